//! Error estructurado del consejero.
//!
//! Todas las fallas internas se propagan al caller como un único enum
//! (kind + mensaje). Nada se reintenta automáticamente: re-parsear es
//! responsabilidad del caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Falta una colección de entrada requerida (p. ej. recomendar sin malla cargada).
    #[error("entrada requerida ausente: {0}")]
    MissingInput(&'static str),

    /// El documento fuente no se pudo leer o decodificar. No se compromete
    /// estado parcial en la sesión.
    #[error("no se pudo decodificar la fuente '{fuente}': {detalle}")]
    SourceDecode { fuente: String, detalle: String },

    /// Error de (de)serialización del esquema persistido.
    #[error("error de serialización: {0}")]
    Serde(#[from] serde_json::Error),
}
