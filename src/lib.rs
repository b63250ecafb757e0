// Biblioteca raíz del crate `consejero`.
// Reexporta los módulos principales: extracción de documentos académicos,
// motor de recomendación y formas JSON para persistencia/reportes.
pub mod api_json;
pub mod error;
pub mod extract;
pub mod models;
pub mod recommend;

pub use error::AdvisorError;
pub use models::SesionEstudiante;
pub use recommend::generar_informe;
