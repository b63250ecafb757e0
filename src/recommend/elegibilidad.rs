//! Estimación de avance y filtro de elegibilidad.
//!
//! Un curso de la malla solo es candidato a recomendación si (a) no está
//! completado, (b) su código aparece en la oferta vigente y (c) todos sus
//! prerrequisitos existen en el historial y están aprobados.

use std::collections::{HashMap, HashSet};

use crate::models::{CursoAprobado, CursoMalla};

/// Heurística lineal de avance: cada 20 créditos aprobados equivalen a un
/// semestre cursado. No consulta el catálogo.
pub const CREDITOS_POR_SEMESTRE: f64 = 20.0;

/// Semestre estimado del estudiante: floor(créditos aprobados / 20) + 1.
pub fn estimar_semestre(aprobados: &HashMap<&str, &CursoAprobado>) -> u32 {
    let total: f64 = aprobados.values().filter(|c| c.aprobado).map(|c| c.creditos).sum();
    (total / CREDITOS_POR_SEMESTRE).floor() as u32 + 1
}

/// Código base: código con una letra mayúscula final removida, para
/// reconciliar historiales que pegan la letra de nota al código
/// ("PHYS121F" → "PHYS121"). Solo aplica si lo que precede es un dígito.
pub fn codigo_base(codigo: &str) -> Option<String> {
    let mut chars = codigo.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(ultimo), Some(penultimo))
            if ultimo.is_ascii_uppercase() && penultimo.is_ascii_digit() =>
        {
            Some(codigo[..codigo.len() - 1].to_string())
        }
        _ => None,
    }
}

/// Conjunto de códigos que cuentan como completados: los códigos aprobados
/// más sus códigos base. Un curso de la malla cuyo código esté en cualquiera
/// de los dos queda excluido de todos los buckets.
pub fn conjunto_completados(aprobados: &HashMap<&str, &CursoAprobado>) -> HashSet<String> {
    let mut set = HashSet::new();
    for curso in aprobados.values() {
        if !curso.aprobado {
            continue;
        }
        set.insert(curso.codigo.clone());
        if let Some(base) = codigo_base(&curso.codigo) {
            set.insert(base);
        }
    }
    set
}

/// Semántica AND estricta: cada prerrequisito debe existir en el historial
/// Y estar aprobado. Prerrequisito ausente ⇒ no cumplido. Lista vacía ⇒
/// trivialmente cumplido.
pub fn prerrequisitos_cumplidos(
    curso: &CursoMalla,
    aprobados: &HashMap<&str, &CursoAprobado>,
) -> bool {
    curso
        .prerrequisitos
        .iter()
        .all(|pre| aprobados.get(pre.as_str()).map(|c| c.aprobado).unwrap_or(false))
}

/// Filtro completo de candidato a recomendación.
pub fn es_candidato(
    curso: &CursoMalla,
    completados: &HashSet<String>,
    oferta: &HashSet<String>,
    aprobados: &HashMap<&str, &CursoAprobado>,
) -> bool {
    !completados.contains(&curso.codigo)
        && oferta.contains(&curso.codigo)
        && prerrequisitos_cumplidos(curso, aprobados)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Categoria;

    fn curso(codigo: &str, prerrequisitos: Vec<&str>) -> CursoMalla {
        CursoMalla {
            semestre: 1,
            codigo: codigo.to_string(),
            titulo: codigo.to_string(),
            categoria: Categoria::AreaCore,
            catedra: 0,
            ayudantia: 0,
            laboratorio: 0,
            creditos_totales: 3.0,
            prerrequisitos: prerrequisitos.into_iter().map(String::from).collect(),
            ects: 6.0,
        }
    }

    fn aprobado(codigo: &str, nota: &str, creditos: f64) -> CursoAprobado {
        CursoAprobado {
            codigo: codigo.to_string(),
            titulo: codigo.to_string(),
            nota: nota.to_string(),
            creditos,
            ects: creditos,
            puntos: 0.0,
            semestre: None,
            aprobado: crate::extract::es_aprobatoria(nota),
        }
    }

    fn indice<'a>(cursos: &'a [CursoAprobado]) -> HashMap<&'a str, &'a CursoAprobado> {
        cursos.iter().map(|c| (c.codigo.as_str(), c)).collect()
    }

    #[test]
    fn test_estimar_semestre() {
        let cursos = vec![
            aprobado("CS101", "BA", 6.0),
            aprobado("MATH101", "CC", 6.0),
            aprobado("PHYS101", "FF", 30.0), // reprobado: no suma
        ];
        let idx = indice(&cursos);
        // floor(12/20)+1 = 1
        assert_eq!(estimar_semestre(&idx), 1);

        let cursos = vec![aprobado("CS101", "BA", 45.0)];
        let idx = indice(&cursos);
        // floor(45/20)+1 = 3
        assert_eq!(estimar_semestre(&idx), 3);
    }

    #[test]
    fn test_codigo_base() {
        assert_eq!(codigo_base("PHYS121F").as_deref(), Some("PHYS121"));
        assert_eq!(codigo_base("CS101"), None);
        assert_eq!(codigo_base("MATH201B").as_deref(), Some("MATH201"));
    }

    #[test]
    fn test_conjunto_completados_incluye_base() {
        let cursos = vec![aprobado("PHYS121F", "P", 3.0)];
        let idx = indice(&cursos);
        let set = conjunto_completados(&idx);
        assert!(set.contains("PHYS121F"));
        assert!(set.contains("PHYS121"));
    }

    #[test]
    fn test_reprobado_no_completa() {
        let cursos = vec![aprobado("CS101", "FF", 3.0)];
        let idx = indice(&cursos);
        assert!(conjunto_completados(&idx).is_empty());
    }

    #[test]
    fn test_prerrequisitos_lista_vacia_trivial() {
        let idx = HashMap::new();
        assert!(prerrequisitos_cumplidos(&curso("CS101", vec![]), &idx));
    }

    #[test]
    fn test_prerrequisito_ausente_no_cumple() {
        let cursos = vec![aprobado("CS101", "BA", 3.0)];
        let idx = indice(&cursos);
        assert!(!prerrequisitos_cumplidos(&curso("CS301", vec!["CS101", "CS201"]), &idx));
    }

    #[test]
    fn test_prerrequisito_reprobado_no_cumple() {
        let cursos = vec![aprobado("CS101", "FF", 3.0)];
        let idx = indice(&cursos);
        assert!(!prerrequisitos_cumplidos(&curso("CS201", vec!["CS101"]), &idx));
    }

    #[test]
    fn test_prerrequisitos_todos_aprobados() {
        let cursos = vec![aprobado("CS101", "BA", 3.0), aprobado("MATH101", "P", 3.0)];
        let idx = indice(&cursos);
        assert!(prerrequisitos_cumplidos(&curso("CS201", vec!["CS101", "MATH101"]), &idx));
    }
}
