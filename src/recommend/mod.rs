//! Motor de recomendación: del resultado de extracción al informe completo.
//!
//! Submódulos:
//! - `elegibilidad`: semestre estimado, conjunto de completados (con códigos
//!   base) y chequeo de prerrequisitos
//! - `prioridad`: buckets, puntaje de urgencia y razones
//! - `progreso`: estadísticas agregadas de avance
//!
//! Todo el motor es puro y síncrono: consume una `SesionEstudiante` por
//! valor de referencia y no guarda estado entre llamadas.

pub mod elegibilidad;
pub mod prioridad;
pub mod progreso;

pub use elegibilidad::{estimar_semestre, prerrequisitos_cumplidos, CREDITOS_POR_SEMESTRE};
pub use prioridad::asignar_buckets;
pub use progreso::generar_progreso;

use std::collections::HashSet;

use crate::api_json::InformeCompleto;
use crate::error::AdvisorError;
use crate::models::SesionEstudiante;

/// Genera el informe completo (progreso + recomendaciones) para una sesión.
///
/// Recomendar sin malla cargada es un error (`MissingInput`), no un informe
/// vacío silencioso. Historial u oferta vacíos sí son válidos: simplemente
/// reducen los candidatos.
pub fn generar_informe(sesion: &SesionEstudiante) -> Result<InformeCompleto, AdvisorError> {
    if sesion.malla.is_empty() {
        return Err(AdvisorError::MissingInput("malla curricular"));
    }

    let aprobados = sesion.indice_aprobados();
    let estimado = elegibilidad::estimar_semestre(&aprobados);
    log::info!(
        "generar_informe: semestre estimado {} ({} aprobados, {} cursos de malla)",
        estimado,
        aprobados.len(),
        sesion.malla.len()
    );

    let oferta: HashSet<String> =
        sesion.disponibles.iter().map(|c| c.codigo.clone()).collect();

    let recomendaciones = prioridad::asignar_buckets(&sesion.malla, &aprobados, &oferta, estimado);
    let progreso = progreso::generar_progreso(&sesion.malla, &aprobados, &sesion.info, estimado);

    Ok(InformeCompleto { progreso, recomendaciones })
}
