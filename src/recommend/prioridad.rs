//! Asignación de buckets, puntaje de prioridad y razones legibles.
//!
//! Las reglas de bucket se evalúan en orden secuencial y gana la primera
//! que calce (un curso puede satisfacer "dentro de ±2" y "categoría
//! electiva" a la vez; la precedencia decide, no son clasificaciones
//! independientes).

use std::collections::{HashMap, HashSet};

use crate::models::{Categoria, CursoAprobado, CursoMalla, CursoRecomendado, Recomendaciones};
use crate::recommend::elegibilidad;

/// Cuenta cuántos *otros* cursos de la malla listan este código como
/// prerrequisito (bono de desbloqueo).
pub fn contar_desbloqueos(codigo: &str, malla: &[CursoMalla]) -> usize {
    malla
        .iter()
        .filter(|c| c.codigo != codigo && c.prerrequisitos.iter().any(|p| p == codigo))
        .count()
}

/// Puntaje entero de urgencia; mayor = más urgente. Solo se calcula para el
/// bucket `nextSemester`.
pub fn calcular_prioridad(curso: &CursoMalla, estimado: u32, desbloqueos: usize) -> i32 {
    let mut prioridad: i32 = 0;

    prioridad += match curso.categoria {
        Categoria::AreaCore => 10,
        Categoria::FacultyCore => 8,
        Categoria::UniversityCore => 6,
        _ => 0,
    };

    if curso.semestre == estimado {
        prioridad += 5;
    } else if curso.semestre == estimado + 1 {
        prioridad += 3;
    }

    if estimado > 8 && curso.semestre <= 8 {
        prioridad += 4;
    }

    if curso.semestre < estimado {
        prioridad += if estimado > 8 { -1 } else { -2 };
    }

    prioridad += 2 * desbloqueos as i32;

    prioridad
}

/// Razón legible para un curso de `nextSemester`: fragmentos de timing,
/// categoría y desbloqueo, unidos por coma.
pub fn construir_razon(curso: &CursoMalla, estimado: u32, desbloqueos: usize) -> String {
    let mut fragmentos: Vec<String> = Vec::new();

    if curso.semestre == estimado {
        fragmentos.push("Current semester course".to_string());
    } else if curso.semestre == estimado + 1 {
        fragmentos.push("Next semester course".to_string());
    } else if curso.semestre < estimado {
        fragmentos.push("Delayed from previous semester".to_string());
    }

    match curso.categoria {
        Categoria::AreaCore => fragmentos.push("Area Core requirement".to_string()),
        Categoria::FacultyCore => fragmentos.push("Faculty Core requirement".to_string()),
        _ => {}
    }

    if desbloqueos > 0 {
        fragmentos.push(format!("Prerequisite for {} other courses", desbloqueos));
    }

    fragmentos.join(", ")
}

fn va_a_proximo_semestre(curso: &CursoMalla, estimado: u32) -> bool {
    curso.semestre == estimado
        || curso.semestre == estimado + 1
        || (estimado > 8 && curso.semestre <= 8)
        || curso.semestre.abs_diff(estimado) <= 2
}

/// Reparte los candidatos elegibles en los cuatro buckets disjuntos y ordena
/// `nextSemester` por prioridad descendente (orden estable: empates
/// conservan el orden de la malla).
pub fn asignar_buckets(
    malla: &[CursoMalla],
    aprobados: &HashMap<&str, &CursoAprobado>,
    oferta: &HashSet<String>,
    estimado: u32,
) -> Recomendaciones {
    let completados = elegibilidad::conjunto_completados(aprobados);
    let mut buckets = Recomendaciones::default();

    for curso in malla {
        if !elegibilidad::es_candidato(curso, &completados, oferta, aprobados) {
            continue;
        }

        if va_a_proximo_semestre(curso, estimado) {
            let desbloqueos = contar_desbloqueos(&curso.codigo, malla);
            buckets.proximo_semestre.push(CursoRecomendado {
                curso: curso.clone(),
                prioridad: calcular_prioridad(curso, estimado, desbloqueos),
                razon: Some(construir_razon(curso, estimado, desbloqueos)),
            });
        } else if curso.categoria.es_electiva() {
            buckets.electivos.push(CursoRecomendado { curso: curso.clone(), prioridad: 0, razon: None });
        } else if curso.semestre < estimado {
            buckets.atrasados.push(CursoRecomendado { curso: curso.clone(), prioridad: 0, razon: None });
        } else {
            buckets.futuros.push(CursoRecomendado { curso: curso.clone(), prioridad: 0, razon: None });
        }
    }

    // sort_by es estable: los empates retienen el orden de entrada
    buckets.proximo_semestre.sort_by(|a, b| b.prioridad.cmp(&a.prioridad));

    buckets
}
