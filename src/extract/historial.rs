//! Extractor de historial académico (cursos cursados + metadatos del
//! estudiante).
//!
//! Dos modos de entrada:
//! - **modo fila** (planilla): cada fila con código y nota produce un curso;
//!   numéricos ausentes o malformados caen a 0.
//! - **modo línea** (texto libre): tabla de variantes priorizadas, de la más
//!   específica (más campos) a la menos, con variantes especiales para la
//!   letra de nota incrustada al final del código. Gana la primera que calce.
//!
//! El diseño por capas existe porque los historiales reales cambian de
//! formato línea a línea: lo correcto es extraer *algún* registro plausible
//! por cada código reconocible, no garantizar cada campo exacto. Las
//! variantes que omiten créditos/ECTS asumen 3, y "P" (aprobatoria) cuando
//! no hay token de nota.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::extract::malla::CODIGO_RE;
use crate::extract::{normalizar_codigo, notas};
use crate::models::{CursoAprobado, InfoEstudiante};

/// Tokens de nota reconocidos en texto libre (dobles letras primero para que
/// la alternancia no corte "FF" en "F").
const NOTA_RE: &str = r"(?:F\*|AA|BA|BB|CB|CC|DC|DD|FD|FF|[ABCD][+\-]?|F|W|P|S|U)";

const NUM_RE: &str = r"\d+(?:[.,]\d+)?";

fn parse_num(s: &str) -> f64 {
    s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Resultado del extractor: lista de asociación ordenada (código, curso) más
/// la info del estudiante. Los duplicados se conservan en la lista para que
/// el orden sea auditable; `SesionEstudiante::indice_aprobados` aplica
/// last-write-wins (las repeticiones aparecen después en el historial).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultadoHistorial {
    pub cursos: Vec<(String, CursoAprobado)>,
    pub info: InfoEstudiante,
}

fn nuevo_curso(
    codigo: String,
    titulo: String,
    nota: String,
    creditos: f64,
    ects: f64,
    puntos: f64,
    semestre: Option<String>,
) -> CursoAprobado {
    // `aprobado` se deriva una sola vez acá y nunca se recalcula
    let aprobado = notas::es_aprobatoria(&nota);
    CursoAprobado { codigo, titulo, nota, creditos, ects, puntos, semestre, aprobado }
}

// ── Variantes de línea ──────────────────────────────────────────────────────

/// Variante de extracción con nombre: matcher + mapeo campo-a-atributo.
pub struct VarianteHistorial {
    pub nombre: &'static str,
    pub regex: &'static LazyLock<Regex>,
    pub map: fn(&Captures, Option<&str>) -> CursoAprobado,
}

// V0: código, título, nota, créditos, ECTS, puntos.
static V_COMPLETA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({c})\s+(.+?)\s+({g})\s+({n})\s+({n})\s+({n})\s*$",
        c = CODIGO_RE,
        g = NOTA_RE,
        n = NUM_RE
    ))
    .unwrap()
});

// V1: código, título, créditos, ECTS, nota. Sin puntos (default 0).
static V_SIN_PUNTOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({c})\s+(.+?)\s+({n})\s+({n})\s+({g})\s*$",
        c = CODIGO_RE,
        g = NOTA_RE,
        n = NUM_RE
    ))
    .unwrap()
});

// V2: código, título, nota. Créditos/ECTS asumen 3.
static V_SOLO_NOTA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({c})\s+(.+?)\s+({g})\s*$", c = CODIGO_RE, g = NOTA_RE)).unwrap()
});

// V3: letra de nota pegada al final del código ("PHYS121F Physics I").
// La letra final se interpreta como nota, no como sección. Convención
// ambigua a propósito; ver tests y el camino alternativo por código base en
// `recommend::elegibilidad`.
static V_NOTA_INCRUSTADA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4}\d{3,4})([ABCDF]|W)\s+(.+?)\s*$").unwrap());

// V4: código y título sin nota. Nota default "P" (aprobatoria), créditos 3.
static V_SIN_NOTA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({c})\s+(.+?)\s*$", c = CODIGO_RE)).unwrap());

fn map_completa(c: &Captures, sem: Option<&str>) -> CursoAprobado {
    nuevo_curso(
        normalizar_codigo(&c[1]),
        c[2].trim().to_string(),
        c[3].to_string(),
        parse_num(&c[4]),
        parse_num(&c[5]),
        parse_num(&c[6]),
        sem.map(str::to_string),
    )
}

fn map_sin_puntos(c: &Captures, sem: Option<&str>) -> CursoAprobado {
    nuevo_curso(
        normalizar_codigo(&c[1]),
        c[2].trim().to_string(),
        c[5].to_string(),
        parse_num(&c[3]),
        parse_num(&c[4]),
        0.0,
        sem.map(str::to_string),
    )
}

fn map_solo_nota(c: &Captures, sem: Option<&str>) -> CursoAprobado {
    nuevo_curso(
        normalizar_codigo(&c[1]),
        c[2].trim().to_string(),
        c[3].to_string(),
        3.0,
        3.0,
        0.0,
        sem.map(str::to_string),
    )
}

fn map_nota_incrustada(c: &Captures, sem: Option<&str>) -> CursoAprobado {
    nuevo_curso(
        normalizar_codigo(&c[1]),
        c[3].trim().to_string(),
        c[2].to_string(),
        3.0,
        3.0,
        0.0,
        sem.map(str::to_string),
    )
}

fn map_sin_nota(c: &Captures, sem: Option<&str>) -> CursoAprobado {
    nuevo_curso(
        normalizar_codigo(&c[1]),
        c[2].trim().to_string(),
        "P".to_string(),
        3.0,
        3.0,
        0.0,
        sem.map(str::to_string),
    )
}

/// Variantes en orden de prioridad descendente (más campos primero; la
/// variante de nota incrustada va antes que el fallback sin nota para que
/// "PHYS121F ..." no se lea como código con letra de sección).
pub static VARIANTES_HISTORIAL: [VarianteHistorial; 5] = [
    VarianteHistorial { nombre: "completa", regex: &V_COMPLETA, map: map_completa },
    VarianteHistorial { nombre: "sin_puntos", regex: &V_SIN_PUNTOS, map: map_sin_puntos },
    VarianteHistorial { nombre: "solo_nota", regex: &V_SOLO_NOTA, map: map_solo_nota },
    VarianteHistorial { nombre: "nota_incrustada", regex: &V_NOTA_INCRUSTADA, map: map_nota_incrustada },
    VarianteHistorial { nombre: "sin_nota", regex: &V_SIN_NOTA, map: map_sin_nota },
];

// ── Contexto de período y metadatos ─────────────────────────────────────────

// Encabezados de período tipo "2022-2023 Fall" / "Fall 2023"
static RE_PERIODO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((?:19|20)\d{2}(?:\s*[-/]\s*(?:19|20)?\d{2})?\s+(?:fall|spring|summer)|(?:fall|spring|summer)\s+(?:19|20)\d{2})\s*$")
        .unwrap()
});

static RE_NUMERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bstudent\s*(?:no|number|id)\s*[.:]?\s*(\S+)").unwrap());
static RE_NOMBRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bname(?:\s*[,/]?\s*surname)?\s*[.:]\s*(.+)").unwrap());
static RE_PROGRAMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:program(?:me)?|department)\s*[.:]\s*(.+)").unwrap());

/// Busca metadatos del estudiante en una línea. Un match posterior para el
/// mismo campo pisa al anterior.
fn extraer_info(linea: &str, info: &mut InfoEstudiante) {
    if let Some(c) = RE_NUMERO.captures(linea) {
        info.numero = Some(c[1].trim().to_string());
    }
    if let Some(c) = RE_NOMBRE.captures(linea) {
        info.nombre = Some(c[1].trim().to_string());
    }
    if let Some(c) = RE_PROGRAMA.captures(linea) {
        info.programa = Some(c[1].trim().to_string());
    }
}

/// Extrae el historial desde texto libre.
pub fn extraer_historial(texto: &str) -> ResultadoHistorial {
    let mut resultado = ResultadoHistorial::default();
    let mut periodo_actual: Option<String> = None;

    for linea in texto.lines() {
        let linea = linea.trim();
        if linea.is_empty() {
            continue;
        }

        extraer_info(linea, &mut resultado.info);

        if let Some(c) = RE_PERIODO.captures(linea) {
            periodo_actual = Some(c[1].trim().to_string());
            continue;
        }

        for variante in VARIANTES_HISTORIAL.iter() {
            if let Some(caps) = variante.regex.captures(linea) {
                log::debug!("historial: variante '{}' calzó: {}", variante.nombre, linea);
                let curso = (variante.map)(&caps, periodo_actual.as_deref());
                resultado.cursos.push((curso.codigo.clone(), curso));
                break;
            }
        }
    }

    resultado
}

// ── Modo fila ───────────────────────────────────────────────────────────────

fn buscar_columna<'a>(fila: &'a HashMap<String, String>, alias: &[&str]) -> Option<&'a str> {
    alias.iter().find_map(|a| fila.get(*a).map(String::as_str))
}

const COL_CODIGO: &[&str] = &["code", "coursecode", "kod", "derskodu"];
const COL_TITULO: &[&str] = &["title", "coursetitle", "name", "coursename", "dersadi"];
const COL_NOTA: &[&str] = &["grade", "lettergrade", "not", "harfnotu"];
const COL_CREDITOS: &[&str] = &["credit", "credits", "kredi"];
const COL_ECTS: &[&str] = &["ects", "akts"];
const COL_PUNTOS: &[&str] = &["points", "gradepoints", "puan"];
const COL_SEMESTRE: &[&str] = &["semester", "term", "donem"];

/// Extrae el historial desde filas tabulares (encabezados ya normalizados
/// por `extract::io::extraer_filas`). Solo las filas con código Y nota
/// producen un registro; los numéricos ausentes caen a 0.
pub fn extraer_historial_filas(filas: &[HashMap<String, String>]) -> ResultadoHistorial {
    let mut resultado = ResultadoHistorial::default();

    for fila in filas {
        let (Some(codigo), Some(nota)) =
            (buscar_columna(fila, COL_CODIGO), buscar_columna(fila, COL_NOTA))
        else {
            continue;
        };

        let curso = nuevo_curso(
            normalizar_codigo(codigo),
            buscar_columna(fila, COL_TITULO).unwrap_or("").to_string(),
            nota.trim().to_string(),
            buscar_columna(fila, COL_CREDITOS).map(parse_num).unwrap_or(0.0),
            buscar_columna(fila, COL_ECTS).map(parse_num).unwrap_or(0.0),
            buscar_columna(fila, COL_PUNTOS).map(parse_num).unwrap_or(0.0),
            buscar_columna(fila, COL_SEMESTRE).map(str::to_string),
        );
        resultado.cursos.push((curso.codigo.clone(), curso));
    }

    resultado
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SesionEstudiante;

    #[test]
    fn test_variante_completa() {
        let r = extraer_historial("CS101 Intro to Programming BA 3 6 10.5");
        assert_eq!(r.cursos.len(), 1);
        let c = &r.cursos[0].1;
        assert_eq!(c.codigo, "CS101");
        assert_eq!(c.nota, "BA");
        assert_eq!(c.creditos, 3.0);
        assert_eq!(c.ects, 6.0);
        assert_eq!(c.puntos, 10.5);
        assert!(c.aprobado);
    }

    #[test]
    fn test_variante_sin_puntos() {
        let r = extraer_historial("MATH102 Calculus II 4 6 CC");
        let c = &r.cursos[0].1;
        assert_eq!(c.creditos, 4.0);
        assert_eq!(c.ects, 6.0);
        assert_eq!(c.nota, "CC");
        assert_eq!(c.puntos, 0.0);
    }

    #[test]
    fn test_defaults_documentados() {
        // Tolerancia deliberada: cuando el formato omite créditos/ECTS se
        // asume 3, y "P" cuando no hay token de nota. Lo correcto es extraer
        // un registro plausible por código reconocible, no acertar cada campo.
        let r = extraer_historial("CS101 Intro to Programming FF\nHIST200 World History");
        let reprobado = &r.cursos[0].1;
        assert_eq!(reprobado.creditos, 3.0);
        assert!(!reprobado.aprobado);

        let sin_nota = &r.cursos[1].1;
        assert_eq!(sin_nota.nota, "P");
        assert!(sin_nota.aprobado);
        assert_eq!(sin_nota.ects, 3.0);
    }

    #[test]
    fn test_nota_incrustada_en_codigo() {
        // Convención ambigua: la letra final de "PHYS121F" colisiona con el
        // token reprobatorio "F". Esta variante toma la letra como nota (el
        // camino alternativo, por código base, vive en recommend::elegibilidad).
        let r = extraer_historial("PHYS121F Physics I");
        let c = &r.cursos[0].1;
        assert_eq!(c.codigo, "PHYS121");
        assert_eq!(c.nota, "F");
        assert!(!c.aprobado);
    }

    #[test]
    fn test_nota_incrustada_aprobatoria() {
        let r = extraer_historial("MATH201B Linear Algebra");
        let c = &r.cursos[0].1;
        assert_eq!(c.codigo, "MATH201");
        assert_eq!(c.nota, "B");
        assert!(c.aprobado);
    }

    #[test]
    fn test_repeticion_last_write_wins() {
        let texto = "CS101 Intro FF\nCS101 Intro BA";
        let r = extraer_historial(texto);
        // la lista conserva ambos registros (auditable)...
        assert_eq!(r.cursos.len(), 2);

        // ...y el índice aplica last-write-wins
        let sesion = SesionEstudiante { aprobados: r.cursos, ..Default::default() };
        let idx = sesion.indice_aprobados();
        assert!(idx.get("CS101").unwrap().aprobado);
        assert_eq!(idx.get("CS101").unwrap().nota, "BA");
    }

    #[test]
    fn test_periodo_contextual() {
        let texto = "2022-2023 Fall\nCS101 Intro BA 3 6 10";
        let r = extraer_historial(texto);
        assert_eq!(r.cursos[0].1.semestre.as_deref(), Some("2022-2023 Fall"));
    }

    #[test]
    fn test_info_estudiante_overwrite() {
        let texto = "Student No: 2019123456\nName: Ada Lovelace\nProgram: Computer Engineering\nStudent No: 2020999999";
        let r = extraer_historial(texto);
        assert_eq!(r.info.numero.as_deref(), Some("2020999999"));
        assert_eq!(r.info.nombre.as_deref(), Some("Ada Lovelace"));
        assert_eq!(r.info.programa.as_deref(), Some("Computer Engineering"));
    }

    #[test]
    fn test_modo_fila() {
        let mut fila = HashMap::new();
        fila.insert("coursecode".to_string(), "CS101".to_string());
        fila.insert("grade".to_string(), "BA".to_string());
        fila.insert("credits".to_string(), "3".to_string());
        fila.insert("ects".to_string(), "no-numerico".to_string());

        let mut sin_nota = HashMap::new();
        sin_nota.insert("coursecode".to_string(), "CS102".to_string());

        let r = extraer_historial_filas(&[fila, sin_nota]);
        // la fila sin nota no produce registro
        assert_eq!(r.cursos.len(), 1);
        let c = &r.cursos[0].1;
        assert_eq!(c.codigo, "CS101");
        assert_eq!(c.creditos, 3.0);
        // numérico malformado cae a 0
        assert_eq!(c.ects, 0.0);
    }

    #[test]
    fn test_linea_basura_se_salta() {
        let r = extraer_historial("--- transcript of records ---\n????\n");
        assert!(r.cursos.is_empty());
    }
}
