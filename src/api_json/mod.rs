//! Formas JSON de intercambio: el esquema persistido de una sesión y la
//! forma del informe de recomendación.
//!
//! # Estructura del JSON persistido:
//! ```json
//! {
//!   "curriculum": [{ "code": "CS101", "semester": 1, "category": "AreaCore", "...": "..." }],
//!   "completedCourses": [["CS101", { "code": "CS101", "grade": "BA", "passed": true }]],
//!   "availableCourses": [{ "code": "CS102", "title": "Data Structures" }],
//!   "studentInfo": { "studentNo": "2019123456", "name": "...", "program": "..." },
//!   "timestamp": "2025-08-25T12:00:00Z"
//! }
//! ```
//!
//! `completedCourses` es una lista explícita de pares [código, curso] — no
//! un mapa — para que el orden y la semántica last-write-wins de los
//! duplicados queden auditables. Escribir/leer el JSON en un almacén es
//! responsabilidad del colaborador de persistencia; aquí solo se define la
//! forma y la (de)serialización.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::models::{
    CursoAprobado, CursoDisponible, CursoMalla, InfoEstudiante, Recomendaciones, ReporteProgreso,
    SesionEstudiante,
};

/// Informe completo que consume el frontend/caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformeCompleto {
    #[serde(rename = "progressReport")]
    pub progreso: ReporteProgreso,
    #[serde(rename = "recommendations")]
    pub recomendaciones: Recomendaciones,
}

/// Registro persistible de una sesión: las tres colecciones extraídas, la
/// info del estudiante y el timestamp ISO-8601 de la extracción.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SesionGuardada {
    #[serde(rename = "curriculum")]
    pub malla: Vec<CursoMalla>,
    #[serde(rename = "completedCourses")]
    pub aprobados: Vec<(String, CursoAprobado)>,
    #[serde(rename = "availableCourses")]
    pub disponibles: Vec<CursoDisponible>,
    #[serde(rename = "studentInfo")]
    pub info: InfoEstudiante,
    pub timestamp: String,
}

impl SesionGuardada {
    /// Congela una sesión con el instante dado.
    pub fn desde_sesion(sesion: &SesionEstudiante, instante: DateTime<Utc>) -> Self {
        Self {
            malla: sesion.malla.clone(),
            aprobados: sesion.aprobados.clone(),
            disponibles: sesion.disponibles.clone(),
            info: sesion.info.clone(),
            timestamp: instante.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Reconstruye la sesión de trabajo (descarta el timestamp).
    pub fn a_sesion(self) -> SesionEstudiante {
        SesionEstudiante {
            malla: self.malla,
            aprobados: self.aprobados,
            disponibles: self.disponibles,
            info: self.info,
        }
    }

    pub fn to_json(&self) -> Result<String, AdvisorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, AdvisorError> {
        Ok(serde_json::from_str(json)?)
    }
}
