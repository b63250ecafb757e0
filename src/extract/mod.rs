//! Módulo `extract` dividido en submódulos para mantener el código organizado.
//!
//! Submódulos:
//! - `io`: colaboradores de fuente (texto UTF-8 y filas de planilla)
//! - `notas`: evaluador de notas aprobatoria/reprobatoria
//! - `malla`: clasificador de semestres + extractor de malla curricular
//! - `historial`: extractor de historial académico (modo línea y modo fila)
//! - `oferta`: extractor de cursos ofertados (código → título)
//!
//! Todos los extractores son best-effort: una línea que ningún patrón
//! reconoce se salta en silencio, no es un error.

pub mod historial;
pub mod io;
pub mod malla;
pub mod notas;
pub mod oferta;

pub use historial::{extraer_historial, extraer_historial_filas, ResultadoHistorial};
pub use io::{extraer_filas, leer_texto};
pub use malla::{extraer_malla, ClasificadorSemestre};
pub use notas::es_aprobatoria;
pub use oferta::extraer_oferta;

/// Normaliza un código institucional: mayúsculas y sin espacios internos.
/// Los códigos válidos siguen el patrón 2-4 letras + 3-4 dígitos + letra
/// opcional (p. ej. "CS101", "PHYS121F").
pub fn normalizar_codigo(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizar_codigo() {
        assert_eq!(normalizar_codigo("cs 101"), "CS101");
        assert_eq!(normalizar_codigo("PHYS 121F"), "PHYS121F");
        assert_eq!(normalizar_codigo("MATH201"), "MATH201");
    }
}
