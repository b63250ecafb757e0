//! Evaluador de notas: clasifica un token de nota como aprobatoria o no.
//!
//! Política de mundo cerrado con default aprobatorio: solo reprueban los
//! tokens del conjunto fijo y las notas que contengan un marcador de
//! repetición. Cualquier otro token (incluso basura) se considera
//! aprobatorio; los callers no deben asumir que un token desconocido
//! reprueba.

/// Tokens de nota que reprueban por sí solos.
pub const NOTAS_REPROBATORIAS: [&str; 5] = ["F", "F*", "FF", "FD", "W"];

/// Subcadenas que fuerzan reprobación sin importar la letra de la nota
/// (marcadores de repetición en el historial).
pub const MARCAS_REPROBATORIAS: [&str; 2] = ["(R)", "RPT"];

/// true si la nota cuenta como aprobada.
pub fn es_aprobatoria(nota: &str) -> bool {
    let token = nota.trim().to_ascii_uppercase();

    if MARCAS_REPROBATORIAS.iter().any(|m| token.contains(m)) {
        return false;
    }

    !NOTAS_REPROBATORIAS.contains(&token.as_str())
}
