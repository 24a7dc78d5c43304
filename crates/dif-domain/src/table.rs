// table.rs
/// Fila que se puede mostrar como tabla o exportar a CSV.
///
/// Las columnas son fijas por tipo; `cells` debe devolver exactamente una
/// celda por columna y en el mismo orden.
pub trait Tabular {
  fn columns() -> &'static [&'static str];
  fn cells(&self) -> Vec<String>;
}

pub(crate) fn opt_cell<T: ToString>(value: &Option<T>) -> String {
  value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
