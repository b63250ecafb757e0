//! Colaboradores de fuente: texto plano UTF-8 y filas de planilla.
//!
//! La conversión de formatos binarios (Word, PDF, etc.) queda fuera del core;
//! aquí solo se implementan las dos interfaces que el core consume:
//! `leer_texto` (documento → texto UTF-8) y `extraer_filas`
//! (planilla → secuencia de {columna: valor}).

use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;

use crate::error::AdvisorError;

/// Convierte un `Data` de calamine a String (versión genérica para celdas).
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lee un documento de texto UTF-8 completo. Una fuente ilegible o no
/// decodificable falla con `SourceDecode`; no se compromete estado parcial.
pub fn leer_texto<P: AsRef<Path>>(path: P) -> Result<String, AdvisorError> {
    let path = path.as_ref();
    std::fs::read(path)
        .map_err(|e| AdvisorError::SourceDecode {
            fuente: path.display().to_string(),
            detalle: e.to_string(),
        })
        .and_then(|bytes| {
            String::from_utf8(bytes).map_err(|e| AdvisorError::SourceDecode {
                fuente: path.display().to_string(),
                detalle: format!("no es UTF-8 válido: {}", e),
            })
        })
}

/// Lee la primera hoja con datos de un workbook (xlsx/xls/xlsb) y devuelve
/// cada fila como mapa encabezado-normalizado → valor de celda.
///
/// La primera fila se toma como encabezado. Celdas vacías se omiten del mapa;
/// los extractores aplican sus propios defaults numéricos.
pub fn extraer_filas<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<HashMap<String, String>>, AdvisorError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| AdvisorError::SourceDecode {
        fuente: path.display().to_string(),
        detalle: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    if sheet_names.is_empty() {
        return Err(AdvisorError::SourceDecode {
            fuente: path.display().to_string(),
            detalle: "el workbook no contiene hojas".to_string(),
        });
    }

    for sheet in sheet_names.iter() {
        let range = match workbook.worksheet_range(sheet) {
            Ok(r) => r,
            Err(_) => continue,
        };

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row.iter().map(|c| normalize_header(&cell_to_string(c))).collect(),
            None => continue,
        };

        let mut filas: Vec<HashMap<String, String>> = Vec::new();
        for row in rows_iter {
            let mut fila: HashMap<String, String> = HashMap::new();
            for (i, cell) in row.iter().enumerate() {
                let valor = cell_to_string(cell);
                if valor.is_empty() {
                    continue;
                }
                if let Some(h) = headers.get(i) {
                    if !h.is_empty() {
                        fila.insert(h.clone(), valor);
                    }
                }
            }
            if !fila.is_empty() {
                filas.push(fila);
            }
        }

        if !filas.is_empty() {
            log::debug!("extraer_filas: {} filas desde hoja '{}'", filas.len(), sheet);
            return Ok(filas);
        }
    }

    // Ninguna hoja produjo filas: planilla vacía es válida, no un error.
    Ok(Vec::new())
}
