// Estructuras de datos principales del consejero académico.
//
// Los nombres de campo serializados (renames) siguen el esquema JSON
// acordado con el colaborador de almacenamiento; ver `api_json`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Clasificación de requisito de la malla: núcleo vs electivo, a nivel de
/// área / facultad / universidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Categoria {
    AreaCore,
    FacultyCore,
    UniversityCore,
    AreaElective,
    FacultyElective,
    UniversityElective,
    Generic,
}

impl Categoria {
    /// true para las categorías electivas (bucket `electives`).
    pub fn es_electiva(&self) -> bool {
        matches!(
            self,
            Categoria::AreaElective | Categoria::FacultyElective | Categoria::UniversityElective
        )
    }
}

/// Un curso de la malla curricular. La malla es una lista ordenada; se
/// permiten códigos duplicados (la recomendación la trata como lista, no mapa).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursoMalla {
    #[serde(rename = "semester")]
    pub semestre: u32,
    #[serde(rename = "code")]
    pub codigo: String,
    #[serde(rename = "title")]
    pub titulo: String,
    #[serde(rename = "category")]
    pub categoria: Categoria,
    #[serde(rename = "lecture")]
    pub catedra: u32,
    #[serde(rename = "tutorial")]
    pub ayudantia: u32,
    #[serde(rename = "lab")]
    pub laboratorio: u32,
    #[serde(rename = "totalCredit")]
    pub creditos_totales: f64,
    #[serde(rename = "prerequisites")]
    pub prerrequisitos: Vec<String>,
    pub ects: f64,
}

/// Un curso ya cursado según el historial del estudiante.
/// `aprobado` se deriva una sola vez al crear el registro (via `extract::notas`)
/// y nunca se recalcula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursoAprobado {
    #[serde(rename = "code")]
    pub codigo: String,
    #[serde(rename = "title")]
    pub titulo: String,
    #[serde(rename = "grade")]
    pub nota: String,
    #[serde(rename = "credits")]
    pub creditos: f64,
    pub ects: f64,
    #[serde(rename = "gradePoints")]
    pub puntos: f64,
    #[serde(rename = "semester", default)]
    pub semestre: Option<String>,
    #[serde(rename = "passed")]
    pub aprobado: bool,
}

/// Un curso actualmente ofertado: código → título.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursoDisponible {
    #[serde(rename = "code")]
    pub codigo: String,
    #[serde(rename = "title")]
    pub titulo: String,
}

/// Metadatos del estudiante extraídos oportunísticamente; la ausencia de un
/// campo no es un error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoEstudiante {
    #[serde(rename = "studentNo", default)]
    pub numero: Option<String>,
    #[serde(rename = "name", default)]
    pub nombre: Option<String>,
    #[serde(rename = "program", default)]
    pub programa: Option<String>,
}

/// Resultado inmutable de una pasada de extracción: las tres colecciones más
/// la info del estudiante. Cada sesión (una corrida por estudiante) posee su
/// propia copia; un parse nuevo reemplaza la sesión completa, nunca campo a
/// campo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SesionEstudiante {
    pub malla: Vec<CursoMalla>,
    /// Lista de asociación ordenada (código, curso). El orden y los duplicados
    /// son auditables; el índice de abajo aplica last-write-wins.
    pub aprobados: Vec<(String, CursoAprobado)>,
    pub disponibles: Vec<CursoDisponible>,
    pub info: InfoEstudiante,
}

impl SesionEstudiante {
    /// Índice reconstruible código → curso aprobado. Una entrada posterior
    /// para el mismo código pisa a la anterior (repeticiones en el historial).
    pub fn indice_aprobados(&self) -> HashMap<&str, &CursoAprobado> {
        let mut idx = HashMap::new();
        for (codigo, curso) in &self.aprobados {
            idx.insert(codigo.as_str(), curso);
        }
        idx
    }
}

/// Curso de la malla anotado con prioridad (y razón, solo en `nextSemester`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursoRecomendado {
    #[serde(flatten)]
    pub curso: CursoMalla,
    #[serde(rename = "priority")]
    pub prioridad: i32,
    #[serde(rename = "reason", default, skip_serializing_if = "Option::is_none")]
    pub razon: Option<String>,
}

/// Los cuatro buckets disjuntos del plan recomendado, cada uno ordenado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recomendaciones {
    #[serde(rename = "nextSemesterCourses")]
    pub proximo_semestre: Vec<CursoRecomendado>,
    #[serde(rename = "availableElectives")]
    pub electivos: Vec<CursoRecomendado>,
    #[serde(rename = "missedCourses")]
    pub atrasados: Vec<CursoRecomendado>,
    #[serde(rename = "futureRecommendations")]
    pub futuros: Vec<CursoRecomendado>,
}

/// Conteos requerido/completado de una categoría de la malla.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstadisticaCategoria {
    pub required: u32,
    pub completed: u32,
}

/// Estadísticas agregadas de avance del estudiante.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReporteProgreso {
    #[serde(rename = "studentInfo")]
    pub info: InfoEstudiante,
    #[serde(rename = "currentSemester")]
    pub semestre_actual: u32,
    #[serde(rename = "totalECTS")]
    pub total_ects: f64,
    #[serde(rename = "totalCredits")]
    pub total_creditos: f64,
    #[serde(rename = "completedCourses")]
    pub cursos_completados: u32,
    #[serde(rename = "totalRequiredCourses")]
    pub cursos_requeridos: u32,
    #[serde(rename = "categoryStats")]
    pub por_categoria: std::collections::BTreeMap<Categoria, EstadisticaCategoria>,
    #[serde(rename = "completionPercentage")]
    pub porcentaje_completado: u32,
}
