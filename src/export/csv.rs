//! CSV出力

use super::ExportOptions;
use crate::error::Result;
use depara_common::{MappedCause, MAPPED_PROBLEM_COLUMN, SIMILARITY_COLUMN};
use std::io::Write;
use std::path::Path;

pub fn generate_csv(
    results: &[MappedCause],
    output_path: &Path,
    options: &ExportOptions<'_>,
) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv(results, file, options)
}

pub fn write_csv<W: Write>(results: &[MappedCause], writer: W, options: &ExportOptions<'_>) -> Result<()> {
    let mut writer = ::csv::Writer::from_writer(writer);

    let [reason, nature, name] = options.source_columns;
    writer.write_record([reason, nature, name, MAPPED_PROBLEM_COLUMN, SIMILARITY_COLUMN])?;

    for result in results {
        let similarity = result.similarity.to_string();
        writer.write_record([
            result.cause.reason.as_str(),
            result.cause.nature.as_str(),
            result.cause.name.as_str(),
            result.mapped_problem.as_str(),
            similarity.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
