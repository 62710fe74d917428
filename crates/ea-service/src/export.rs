//! CSV export of per-centre distance tables.
//!
//! One `distances_<centre_id>.csv` per successful centre, header row then
//! `node_id,seconds` records sorted by node id so repeated exports diff
//! cleanly.

use std::path::Path;

use csv::Writer;

use ea_core::NodeId;
use ea_routing::CentreSsspResult;

use crate::error::ServiceResult;

/// Write every successful centre's table into `dir`, creating it if needed.
pub fn write_distance_tables(dir: &Path, results: &[CentreSsspResult]) -> ServiceResult<()> {
    std::fs::create_dir_all(dir)?;

    for result in results.iter().filter(|r| r.is_success()) {
        let path = dir.join(format!("distances_{}.csv", result.centre_id));
        let mut writer = Writer::from_path(&path)?;
        writer.write_record(["node_id", "seconds"])?;

        let mut rows: Vec<(NodeId, f64)> = result
            .distances
            .iter()
            .map(|(&node, &seconds)| (node, seconds))
            .collect();
        rows.sort_unstable_by_key(|&(node, _)| node);

        for (node, seconds) in rows {
            writer.write_record(&[node.0.to_string(), format!("{seconds:.3}")])?;
        }
        writer.flush()?;
    }

    log::info!(
        target: "ea.sssp",
        "wrote {} distance tables to {}",
        results.iter().filter(|r| r.is_success()).count(),
        dir.display()
    );
    Ok(())
}
