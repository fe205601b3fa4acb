use crate::args::Args;
use crate::commands::Out;
use crate::{Converter, ExportedFiles, Result};

/// Converts the export named in `args` and prints the summary report to stdout unless
/// `--no-summary` was given.
pub fn convert(args: &Args) -> Result<Out<ExportedFiles>> {
    let converter = Converter::new(
        args.json_file().path(),
        args.output_dir().map(|dir| dir.path().to_path_buf()),
    )?;

    let exported = converter.export_to_csv()?;

    if !args.no_summary() {
        let summary = converter.summary(&exported)?;
        println!("\n{summary}");
    }

    Ok(Out::new(
        format!(
            "Wrote {} CSV files to {}",
            exported.len(),
            converter.output_dir().display()
        ),
        exported,
    ))
}
