//! Reporte de progreso: agregados de avance sobre la malla y el historial.

use std::collections::{BTreeMap, HashMap};

use crate::models::{CursoAprobado, CursoMalla, EstadisticaCategoria, InfoEstudiante, ReporteProgreso};

/// Calcula las estadísticas de avance. `required` incrementa una vez por
/// entrada de malla aunque haya códigos duplicados; `completed` incrementa
/// si ese código exacto está aprobado en el historial. El porcentaje con
/// malla vacía es 0 definido, nunca una división fallida.
pub fn generar_progreso(
    malla: &[CursoMalla],
    aprobados: &HashMap<&str, &CursoAprobado>,
    info: &InfoEstudiante,
    semestre_estimado: u32,
) -> ReporteProgreso {
    let total_ects: f64 = aprobados.values().filter(|c| c.aprobado).map(|c| c.ects).sum();
    let total_creditos: f64 =
        aprobados.values().filter(|c| c.aprobado).map(|c| c.creditos).sum();

    let mut por_categoria: BTreeMap<_, EstadisticaCategoria> = BTreeMap::new();
    let mut completados_en_malla: u32 = 0;

    for curso in malla {
        let stats = por_categoria.entry(curso.categoria).or_default();
        stats.required += 1;
        let aprobado = aprobados.get(curso.codigo.as_str()).map(|c| c.aprobado).unwrap_or(false);
        if aprobado {
            stats.completed += 1;
            completados_en_malla += 1;
        }
    }

    let porcentaje = if malla.is_empty() {
        0
    } else {
        (100.0 * completados_en_malla as f64 / malla.len() as f64).round() as u32
    };

    ReporteProgreso {
        info: info.clone(),
        semestre_actual: semestre_estimado,
        total_ects,
        total_creditos,
        cursos_completados: aprobados.values().filter(|c| c.aprobado).count() as u32,
        cursos_requeridos: malla.len() as u32,
        por_categoria,
        porcentaje_completado: porcentaje,
    }
}
