use crate::runner::catalogue_names;
use anyhow::Result;

/// Print the benchmark catalogue section names in execution order
pub fn execute_cases() -> Result<()> {
    for (index, name) in catalogue_names().iter().enumerate() {
        println!("Test #{}: {}", index + 1, name);
    }
    Ok(())
}
