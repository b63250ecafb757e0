//! Extractor de malla curricular desde texto con formato variable.
//!
//! Dos piezas: el `ClasificadorSemestre` detecta encabezados de semestre y
//! mantiene el contexto vigente; la tabla `PATRONES_MALLA` convierte las
//! demás líneas en cursos tipados. Cada patrón es una estrategia pura
//! `línea → Option<CursoMalla>`; se prueban en orden fijo de prioridad
//! descendente y gana el primero que calce. Una vez que un patrón menos
//! específico calzó, los siguientes no se intentan: el orden ES la
//! prioridad, no una garantía de exhaustividad.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::extract::normalizar_codigo;
use crate::models::{Categoria, CursoMalla};

/// Patrón institucional de código: 2-4 letras + 3-4 dígitos + letra opcional.
pub const CODIGO_RE: &str = r"[A-Z]{2,4}\s?\d{3,4}[A-Z]?";

const CATEGORIA_RE: &str = r"(?:AC|FC|UC|AE|FE|UE|G|(?:Area|Faculty|University)\s+(?:Core|Elective)|Generic)";

/// Número con coma o punto decimal; malformado cae a 0, no aborta el parse.
fn parse_num(s: &str) -> f64 {
    s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

fn parse_entero(s: &str) -> u32 {
    s.trim().parse::<u32>().unwrap_or(0)
}

/// Mapea el token de categoría del documento al enum. Token desconocido cae
/// a `Generic` (el patrón ya validó la forma, esto es solo el mapeo).
fn parsear_categoria(token: &str) -> Categoria {
    let t: String = token.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect();
    match t.as_str() {
        "ac" | "areacore" => Categoria::AreaCore,
        "fc" | "facultycore" => Categoria::FacultyCore,
        "uc" | "universitycore" => Categoria::UniversityCore,
        "ae" | "areaelective" => Categoria::AreaElective,
        "fe" | "facultyelective" => Categoria::FacultyElective,
        "ue" | "universityelective" => Categoria::UniversityElective,
        _ => Categoria::Generic,
    }
}

/// Separa una lista de prerrequisitos "CS101, MATH201". El guion placeholder
/// se descarta.
fn parsear_prerrequisitos(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && *p != "-")
        .map(normalizar_codigo)
        .collect()
}

// ── Marcadores de semestre ──────────────────────────────────────────────────
// Probados en orden fijo; gana el primero. Un marcador posterior puede
// legalmente retroceder el contexto (un "Semester 1" tardío resetea).

static M_ENTERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\s*\.?\s*$").unwrap());
static M_SEMESTRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsemester\s*:?\s*(\d{1,2})\b").unwrap());
static M_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*(?:st|nd|rd|th)\s+semester\b").unwrap());
static M_ANIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\byear\s*:?\s*(\d{1,2})\b").unwrap());

/// Mantiene el semestre vigente mientras se recorre el documento de malla.
#[derive(Debug, Default)]
pub struct ClasificadorSemestre {
    pub semestre_actual: Option<u32>,
}

impl ClasificadorSemestre {
    pub fn new() -> Self {
        Self { semestre_actual: None }
    }

    /// Si la línea es un marcador de semestre/sección, actualiza el contexto
    /// y devuelve el semestre detectado. Si no, deja el estado intacto y la
    /// línea sigue siendo elegible para extracción de cursos.
    pub fn clasificar(&mut self, linea: &str) -> Option<u32> {
        let detectado = if let Some(c) = M_ENTERO.captures(linea) {
            Some(parse_entero(&c[1]))
        } else if let Some(c) = M_SEMESTRE.captures(linea) {
            Some(parse_entero(&c[1]))
        } else if let Some(c) = M_ORDINAL.captures(linea) {
            Some(parse_entero(&c[1]))
        } else if let Some(c) = M_ANIO.captures(linea) {
            // "Year N" abre el primer semestre de ese año
            Some(parse_entero(&c[1]) * 2 - 1)
        } else {
            None
        };

        match detectado {
            Some(s) if s >= 1 => {
                self.semestre_actual = Some(s);
                Some(s)
            }
            _ => None,
        }
    }
}

// ── Patrones de curso ───────────────────────────────────────────────────────

/// Estrategia de extracción con nombre: matcher + mapeo de campos.
pub struct PatronMalla {
    pub nombre: &'static str,
    pub regex: &'static LazyLock<Regex>,
    pub map: fn(&Captures, u32) -> CursoMalla,
}

// P0 completo: código, título, categoría, cátedra/ayudantía/lab/créditos,
// lista opcional de prerrequisitos (o "-"), ECTS.
static P0_COMPLETO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({c})\s+(.+?)\s+({cat})\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+(?:[.,]\d+)?)\s+(?:(-|{c}(?:\s*,\s*{c})*)\s+)?(\d+(?:[.,]\d+)?)\s*$",
        c = CODIGO_RE,
        cat = CATEGORIA_RE
    ))
    .unwrap()
});

// P1 reducido: código, título, créditos, ECTS, categoría. Sin desglose L/T/P.
static P1_REDUCIDO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({c})\s+(.+?)\s+(\d+(?:[.,]\d+)?)\s+(\d+(?:[.,]\d+)?)\s+({cat})\s*$",
        c = CODIGO_RE,
        cat = CATEGORIA_RE
    ))
    .unwrap()
});

// P2 mínimo: código, título, créditos. Categoría y ECTS por default.
static P2_MINIMO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({c})\s+(.+?)\s+(\d+(?:[.,]\d+)?)\s*$", c = CODIGO_RE)).unwrap()
});

fn map_completo(c: &Captures, semestre: u32) -> CursoMalla {
    CursoMalla {
        semestre,
        codigo: normalizar_codigo(&c[1]),
        titulo: c[2].trim().to_string(),
        categoria: parsear_categoria(&c[3]),
        catedra: parse_entero(&c[4]),
        ayudantia: parse_entero(&c[5]),
        laboratorio: parse_entero(&c[6]),
        creditos_totales: parse_num(&c[7]),
        prerrequisitos: c.get(8).map(|m| parsear_prerrequisitos(m.as_str())).unwrap_or_default(),
        ects: parse_num(&c[9]),
    }
}

fn map_reducido(c: &Captures, semestre: u32) -> CursoMalla {
    CursoMalla {
        semestre,
        codigo: normalizar_codigo(&c[1]),
        titulo: c[2].trim().to_string(),
        categoria: parsear_categoria(&c[5]),
        catedra: 0,
        ayudantia: 0,
        laboratorio: 0,
        creditos_totales: parse_num(&c[3]),
        prerrequisitos: Vec::new(),
        ects: parse_num(&c[4]),
    }
}

fn map_minimo(c: &Captures, semestre: u32) -> CursoMalla {
    let creditos = parse_num(&c[3]);
    CursoMalla {
        semestre,
        codigo: normalizar_codigo(&c[1]),
        titulo: c[2].trim().to_string(),
        categoria: Categoria::UniversityCore,
        catedra: 0,
        ayudantia: 0,
        laboratorio: 0,
        creditos_totales: creditos,
        prerrequisitos: Vec::new(),
        // Sin columna ECTS: asumir paridad con los créditos
        ects: creditos,
    }
}

/// Tabla de estrategias en orden de prioridad descendente.
pub static PATRONES_MALLA: [PatronMalla; 3] = [
    PatronMalla { nombre: "completo", regex: &P0_COMPLETO, map: map_completo },
    PatronMalla { nombre: "reducido", regex: &P1_REDUCIDO, map: map_reducido },
    PatronMalla { nombre: "minimo", regex: &P2_MINIMO, map: map_minimo },
];

/// Extrae la malla completa del texto. Conserva el orden de aparición y no
/// deduplica por código (la recomendación tolera duplicados tratando la
/// malla como lista). Líneas sin patrón o sin contexto de semestre se
/// saltan en silencio.
pub fn extraer_malla(texto: &str) -> Vec<CursoMalla> {
    let mut clasificador = ClasificadorSemestre::new();
    let mut cursos: Vec<CursoMalla> = Vec::new();

    for linea in texto.lines() {
        let linea = linea.trim();
        if linea.is_empty() {
            continue;
        }

        if clasificador.clasificar(linea).is_some() {
            continue;
        }

        let Some(semestre) = clasificador.semestre_actual else {
            // sin contexto todavía: no se puede ubicar el curso
            continue;
        };

        for patron in PATRONES_MALLA.iter() {
            if let Some(caps) = patron.regex.captures(linea) {
                log::debug!("malla: patrón '{}' calzó: {}", patron.nombre, linea);
                cursos.push((patron.map)(&caps, semestre));
                break;
            }
        }
    }

    cursos
}
