// --- Consejero Académico - Archivo principal ---
//
// Runner de línea de comandos: lee los tres documentos fuente, arma la
// sesión y escribe el informe JSON por stdout. El transporte HTTP y la
// persistencia quedan en manos de los colaboradores externos.

use std::process::ExitCode;

use consejero::api_json::InformeCompleto;
use consejero::error::AdvisorError;
use consejero::extract;
use consejero::models::SesionEstudiante;

fn uso() -> &'static str {
    "uso: consejero <malla.txt> <historial.txt|historial.xlsx> <oferta.txt>"
}

fn ejecutar(malla_path: &str, historial_path: &str, oferta_path: &str) -> Result<InformeCompleto, AdvisorError> {
    let malla = extract::extraer_malla(&extract::leer_texto(malla_path)?);

    // Historial: planilla va por modo fila, cualquier otra cosa por texto
    let es_planilla = historial_path
        .rsplit('.')
        .next()
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "xlsx" | "xls" | "xlsb"))
        .unwrap_or(false);
    let historial = if es_planilla {
        extract::extraer_historial_filas(&extract::extraer_filas(historial_path)?)
    } else {
        extract::extraer_historial(&extract::leer_texto(historial_path)?)
    };

    let disponibles = extract::extraer_oferta(&extract::leer_texto(oferta_path)?);

    let sesion = SesionEstudiante {
        malla,
        aprobados: historial.cursos,
        disponibles,
        info: historial.info,
    };

    consejero::generar_informe(&sesion)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("{}", uso());
        return ExitCode::from(2);
    }

    match ejecutar(&args[1], &args[2], &args[3]) {
        Ok(informe) => match serde_json::to_string_pretty(&informe) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error serializando el informe: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
