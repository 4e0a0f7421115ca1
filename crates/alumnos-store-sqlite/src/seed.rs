//! Catalog seed data: the computing-engineering programme, its subjects and
//! the eight-semester calendar.
//!
//! Seeding runs on every open and is idempotent (`INSERT OR IGNORE`). Subject
//! ids follow the order of [`SUBJECTS`], starting at 1.

use rusqlite::Connection;

pub const COURSE_ID: i64 = 1;
pub const COURSE_NAME: &str = "INGENIERIA EN COMPUTACION";

/// `(key, name, coins)` for every subject of [`COURSE_ID`].
pub const SUBJECTS: &[(&str, &str, u32)] = &[
  ("LINC01", "ALGEBRA LINEAL", 7),
  ("LINC02", "ALGEBRA SUPERIOR", 7),
  ("LINC03", "CALCULO I", 7),
  ("LINC04", "CALCULO II", 7),
  ("LINC05", "CALCULO III", 7),
  ("LINC06", "COMUNICACION Y RELACIONES HUMANAS", 7),
  ("LINC07", "ECUACIONES DIFERENCIALES", 7),
  ("LINC08", "EL INGENIERO Y SU ENTORNO SOCIOECONOMICO", 7),
  ("LINC09", "ELECTROMAGNETISMO", 7),
  ("LINC10", "EPISTEMOLOGIA", 7),
  ("LINC11", "FISICA", 7),
  ("LINC12", "GEOMETRIA ANALITICA", 7),
  ("LINC13", "MATEMATICAS DISCRETAS", 7),
  ("LINC14", "PROBABILIDAD Y ESTADISTICA", 7),
  ("LINC15", "PROGRAMACION I", 7),
  ("LINC29", "QUIMICA", 7),
  ("LMU209", "INGLES 5", 6),
  ("LMU306", "INGLES 6", 6),
  ("LMU404", "INGLES 7", 6),
  ("LMU505", "INGLES 8", 6),
  ("LINC16", "ADMINISTRACION DE PROYECTOS INFORMATICOS", 7),
  ("LINC17", "ADMINISTRACION DE RECURSOS INFORMATICOS", 7),
  ("LINC18", "ARQUITECTURA DE COMPUTADORAS", 7),
  ("LINC19", "ARQUITECTURA DE REDES", 5),
  ("LINC20", "BASES DE DATOS I", 7),
  ("LINC21", "BASES DE DATOS II", 5),
  ("LINC22", "CIRCUITOS ELECTRICOS Y ELECTRONICOS", 10),
  ("LINC23", "COMPILADORES", 7),
  ("LINC24", "ENSAMBLADORES", 7),
  ("LINC25", "GRAFICACION COMPUTACIONAL", 5),
  ("LINC26", "INGENIERIA DE SOFTWARE I", 7),
  ("LINC27", "INGENIERIA DE SOFTWARE II", 7),
  ("LINC28", "INTELIGENCIA ARTIFICIAL", 7),
  ("LINC30", "METODOS ESTADISTICOS", 7),
  ("LINC31", "METODOS NUMERICOS", 5),
  ("LINC32", "PARADIGMAS DE PROGRAMACION I", 5),
  ("LINC33", "PARADIGMAS DE PROGRAMACION II", 5),
  ("LINC34", "PROCESAMIENTO DE IMAGENES DIGITALES", 7),
  ("LINC35", "PROGRAMACION II", 7),
  ("LINC36", "PROTOCOLOS DE COMUNICACION DE DATOS", 7),
  ("LINC37", "ROBOTICA", 7),
  ("LINC38", "SEGURIDAD DE LA INFORMACION", 7),
  ("LINC39", "SISTEMAS ANALOGICOS", 7),
  ("LINC40", "SISTEMAS DIGITALES", 7),
  ("LINC41", "SISTEMAS OPERATIVOS", 7),
  ("LINC42", "TRANSMISION DE DATOS", 7),
  ("L41004", "INVESTIGACION DE OPERACIONES", 7),
  ("LINC43", "CIENCIA DE LOS DATOS", 5),
  ("LINC44", "ETICA PROFESIONAL Y SUSTENTABILIDAD", 6),
  ("LINC45", "GESTION DE PROYECTOS DE INVESTIGACION", 4),
  ("LINC46", "PROYECTO INTEGRAL DE COMUNICACION DE DATOS", 5),
  ("LINC47", "PROYECTO INTEGRAL DE INGENIERIA DE SOFTWARE", 5),
  ("LINC48", "SISTEMAS EMBEBIDOS", 6),
  ("LINC49", "TECNOLOGIAS COMPUTACIONALES I", 5),
  ("LINC50", "TECNOLOGIAS COMPUTACIONALES II", 5),
  ("LINC51", "INTEGRATIVA PROFESIONAL", 8),
  ("LINC52", "PRACTICA PROFESIONAL", 30),
  ("LINC53", "ANALISIS Y DISEÑO DE REDES", 5),
  ("LINC54", "COMPUTING IN INDUSTRY", 5),
  ("LINC55", "GESTION DE REDES", 5),
  ("LINC56", "INTERACCION HOMBRE-MAQUINA", 5),
  ("LINC57", "RECONOCIMIENTO DE PATRONES", 5),
  ("LINC58", "SISTEMAS INTERACTIVOS", 5),
  ("LINC59", "TECNOLOGIAS EMERGENTES", 5),
  ("LINC60", "TOPICOS DE TECNOLOGIAS DE DATOS", 5),
  ("LINC61", "VISION ARTIFICIAL", 5),
];

pub const SEMESTERS: [&str; 8] = [
  "Primer Semestre",
  "Segundo Semestre",
  "Tercer Semestre",
  "Cuarto Semestre",
  "Quinto Semestre",
  "Sexto Semestre",
  "Séptimo Semestre",
  "Octavo Semestre",
];

/// Insert the catalog rows that are not present yet, in one transaction.
pub fn seed_catalog(conn: &mut Connection) -> rusqlite::Result<()> {
  let tx = conn.transaction()?;
  {
    tx.execute(
      "INSERT OR IGNORE INTO courses (id, name) VALUES (?1, ?2)",
      rusqlite::params![COURSE_ID, COURSE_NAME],
    )?;

    let mut subject = tx.prepare(
      "INSERT OR IGNORE INTO subjects (id, course_id, key, name, coins)
       VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (id, (key, name, coins)) in (1_i64..).zip(SUBJECTS) {
      subject.execute(rusqlite::params![id, COURSE_ID, key, name, coins])?;
    }

    let mut semester =
      tx.prepare("INSERT OR IGNORE INTO semesters (id, name) VALUES (?1, ?2)")?;
    for (id, name) in (1_i64..).zip(SEMESTERS) {
      semester.execute(rusqlite::params![id, name])?;
    }
  }
  tx.commit()
}
