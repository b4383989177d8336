use std::path::Path;

use anyhow::Result;
use compute::Dataset;
use tracing::{debug, error, info, trace, warn};

pub fn inspect_dataset(data_path: &Path) -> Result<()> {
    trace!("Entering inspect_dataset function");
    info!("Inspecting forecast file {}", data_path.display());

    let dataset = match Dataset::load(data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load '{}': {}", data_path.display(), e);
            return Err(e.into());
        }
    };

    let summary = dataset.summary();
    info!("Rows: {}", summary.rows);
    info!("Columns: {}", summary.columns.join(", "));
    info!("Distinct suppliers: {}", summary.suppliers);
    info!("Distinct materials: {}", summary.materials);
    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => info!("Forecast dates: {} to {}", first, last),
        _ => info!("Forecast dates: none"),
    }
    if summary.unparsed_dates > 0 {
        warn!("{} date values are not valid day-first dates", summary.unparsed_dates);
    }
    if summary.unparsed_quantities > 0 {
        warn!("{} quantity values are not numbers", summary.unparsed_quantities);
    }
    debug!("Suppliers: {:?}", dataset.suppliers());

    info!("Forecast file is usable");
    Ok(())
}
