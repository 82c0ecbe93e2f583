//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::compiler::ModuleInterface;
use crate::error::{Result, fs as fs_error};
use crate::ui::display::display_interface;

/// Run inspect command
pub fn run(args: InspectArgs) -> Result<()> {
    if !args.file.is_file() {
        return Err(fs_error::not_found(&args.file));
    }
    let bytes = std::fs::read(&args.file).map_err(|e| fs_error::read_failed(&args.file, &e))?;
    let interface = ModuleInterface::parse(&bytes)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&interface)?);
    } else {
        display_interface(&interface);
    }
    Ok(())
}
