//! Extractor de oferta vigente: qué cursos se dictan este período.
//!
//! Variantes por línea, en orden fijo y gana la primera: código + título,
//! código con espacio interno + título (el espacio se elimina), código con
//! letra final opcional + título, y código solo (el título cae al código).

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::normalizar_codigo;
use crate::models::CursoDisponible;

static O_CODIGO_TITULO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4}\d{3,4})\s+(.+?)\s*$").unwrap());
static O_CODIGO_ESPACIADO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4}\s\d{3,4})\s+(.+?)\s*$").unwrap());
static O_CODIGO_SECCION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4}\d{3,4}[A-Z]?)\s+(.+?)\s*$").unwrap());
static O_CODIGO_SOLO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4}\s?\d{3,4}[A-Z]?)\s*$").unwrap());

/// Extrae los cursos ofertados. Los códigos duplicados colapsan con
/// last-write-wins (se conserva la posición de la primera aparición).
pub fn extraer_oferta(texto: &str) -> Vec<CursoDisponible> {
    let mut oferta: Vec<CursoDisponible> = Vec::new();

    for linea in texto.lines() {
        let linea = linea.trim();
        if linea.is_empty() {
            continue;
        }

        let extraido = if let Some(c) = O_CODIGO_TITULO.captures(linea) {
            Some((normalizar_codigo(&c[1]), c[2].trim().to_string()))
        } else if let Some(c) = O_CODIGO_ESPACIADO.captures(linea) {
            Some((normalizar_codigo(&c[1]), c[2].trim().to_string()))
        } else if let Some(c) = O_CODIGO_SECCION.captures(linea) {
            Some((normalizar_codigo(&c[1]), c[2].trim().to_string()))
        } else if let Some(c) = O_CODIGO_SOLO.captures(linea) {
            let codigo = normalizar_codigo(&c[1]);
            Some((codigo.clone(), codigo))
        } else {
            None
        };

        let Some((codigo, titulo)) = extraido else { continue };

        match oferta.iter_mut().find(|c| c.codigo == codigo) {
            Some(existente) => existente.titulo = titulo,
            None => oferta.push(CursoDisponible { codigo, titulo }),
        }
    }

    oferta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codigo_mas_titulo() {
        let oferta = extraer_oferta("CS101 Introduction to Programming");
        assert_eq!(oferta.len(), 1);
        assert_eq!(oferta[0].codigo, "CS101");
        assert_eq!(oferta[0].titulo, "Introduction to Programming");
    }

    #[test]
    fn test_codigo_con_espacio_interno() {
        let oferta = extraer_oferta("CS 101 Introduction to Programming");
        assert_eq!(oferta[0].codigo, "CS101");
    }

    #[test]
    fn test_codigo_con_letra_final() {
        let oferta = extraer_oferta("PHYS121A Physics I");
        assert_eq!(oferta[0].codigo, "PHYS121A");
        assert_eq!(oferta[0].titulo, "Physics I");
    }

    #[test]
    fn test_codigo_solo_titulo_default() {
        let oferta = extraer_oferta("MATH201");
        assert_eq!(oferta[0].codigo, "MATH201");
        assert_eq!(oferta[0].titulo, "MATH201");
    }

    #[test]
    fn test_duplicado_ultimo_gana() {
        let oferta = extraer_oferta("CS101 Intro\nCS101 Introduction to Programming");
        assert_eq!(oferta.len(), 1);
        assert_eq!(oferta[0].titulo, "Introduction to Programming");
    }

    #[test]
    fn test_linea_irreconocible_se_salta() {
        let oferta = extraer_oferta("--- offered courses ---\n\nCS101 Intro");
        assert_eq!(oferta.len(), 1);
    }
}
