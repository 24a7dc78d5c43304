//! Formato de tablas para la terminal y exportación a fichero.

use anyhow::{Context, Result};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use dif_domain::Tabular;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formato de exportación, elegido por la extensión del fichero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Csv,
  Tsv,
  Json,
}

impl ExportFormat {
  /// `.json` y `.tsv` se reconocen; cualquier otra extensión es CSV.
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
      Some("json") => ExportFormat::Json,
      Some("tsv") => ExportFormat::Tsv,
      _ => ExportFormat::Csv,
    }
  }
}

/// Tabla con cabecera para la terminal.
pub fn render_table<T: Tabular>(title: &str, rows: &[T]) -> String {
  if rows.is_empty() {
    return format!("{}\n", "Sin resultados".yellow());
  }

  let mut output = String::new();
  output.push_str(&format!("{}\n", title.bold().green()));
  output.push_str(&format!("Filas: {}\n\n", rows.len()));

  let mut table = Table::new();
  table.load_preset(UTF8_FULL);
  let header_cells: Vec<Cell> = T::columns().iter().map(|col| Cell::new(col).fg(Color::Green)).collect();
  table.set_header(header_cells);
  for row in rows {
    table.add_row(row.cells());
  }

  output.push_str(&table.to_string());
  output.push('\n');
  output
}

/// Escribe las filas separadas por `delimiter`, con fila de cabecera.
pub fn write_delimited<T: Tabular, W: Write>(rows: &[T], writer: W, delimiter: u8) -> Result<()> {
  let mut wtr = csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer);
  wtr.write_record(T::columns())?;
  for row in rows {
    wtr.write_record(row.cells())?;
  }
  wtr.flush()?;
  Ok(())
}

/// Exporta las filas a `path` en el formato que indique su extensión.
pub fn export<T: Tabular + Serialize>(rows: &[T], path: &Path) -> Result<ExportFormat> {
  let format = ExportFormat::from_path(path);
  let file = File::create(path).with_context(|| format!("no se pudo crear {}", path.display()))?;
  let mut writer = BufWriter::new(file);
  match format {
    ExportFormat::Json => {
      serde_json::to_writer_pretty(&mut writer, rows)?;
      writer.write_all(b"\n")?;
      writer.flush()?;
    }
    ExportFormat::Tsv => write_delimited(rows, writer, b'\t')?,
    ExportFormat::Csv => write_delimited(rows, writer, b',')?,
  }
  Ok(format)
}

#[cfg(test)]
mod tests {
  use super::*;
  use dif_domain::DomainStubs;
  use std::path::PathBuf;
  use uuid::Uuid;

  fn temp_file(ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dif_export_{}.{}", Uuid::new_v4(), ext))
  }

  #[test]
  fn format_follows_extension() {
    assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), ExportFormat::Json);
    assert_eq!(ExportFormat::from_path(Path::new("out.tsv")), ExportFormat::Tsv);
    assert_eq!(ExportFormat::from_path(Path::new("out.xlsx")), ExportFormat::Csv);
    assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Csv);
  }

  #[test]
  fn delimited_output_has_header_and_joined_actions() {
    let rows = DomainStubs::druggable_rows();
    let mut buf = Vec::new();
    write_delimited(&rows, &mut buf, b'\t').unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("drug\tcapsule_interactor_type"));
    assert_eq!(lines.clone().count(), rows.len());
    assert!(text.contains("inhibitor|activator"));
  }

  #[test]
  fn json_export_round_trips() {
    let rows = DomainStubs::interactor_rows();
    let path = temp_file("json");
    assert_eq!(export(&rows, &path).unwrap(), ExportFormat::Json);
    let back: Vec<dif_domain::InteractorRecord> = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(back, rows);
    let _ = std::fs::remove_file(path);
  }

  #[test]
  fn table_lists_columns() {
    let rows = DomainStubs::interactor_rows();
    let rendered = render_table("Interactores", &rows);
    assert!(rendered.contains("interactor_name"));
    assert!(rendered.contains("GSK3B"));
    assert!(render_table::<dif_domain::InteractorRecord>("x", &[]).contains("Sin resultados"));
  }
}
