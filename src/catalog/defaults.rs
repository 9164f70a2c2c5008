//! Built-in data tables: the NAS item catalog and the facility list.
//!
//! Both can be replaced from the config file.

/// (code, label, weight) in display order
pub const NAS_ITEMS: &[(&str, &str, f64)] = &[
    ("1a", "Monitorización y controles: signos vitales horarios, balance hídrico", 4.5),
    ("1b", "Monitorización: presencia a pie de cama ≥2 h en algún turno", 12.1),
    ("1c", "Monitorización: presencia a pie de cama ≥4 h en algún turno", 19.6),
    ("2", "Procedimientos de laboratorio, bioquímica y microbiología", 4.3),
    ("3", "Medicación, excluidas drogas vasoactivas", 5.6),
    ("4a", "Higiene: procedimientos habituales", 4.1),
    ("4b", "Higiene: procedimientos >2 h en algún turno", 16.5),
    ("4c", "Higiene: procedimientos >4 h en algún turno", 20.0),
    ("5", "Cuidados de drenajes (excepto sonda gástrica)", 1.8),
    ("6a", "Movilización y cambios posturales hasta 3 veces en 24 h", 5.5),
    ("6b", "Movilización más de 3 veces en 24 h o con 2 enfermeras", 12.4),
    ("6c", "Movilización con 3 o más enfermeras", 17.0),
    ("7a", "Apoyo y cuidados de familiares y pacientes ~1 h", 4.0),
    ("7b", "Apoyo y cuidados de familiares y pacientes ≥3 h", 32.0),
    ("8a", "Tareas administrativas y de gestión habituales", 4.2),
    ("8b", "Tareas administrativas ~2 h en algún turno", 23.2),
    ("8c", "Tareas administrativas ~4 h en algún turno", 30.0),
    ("9", "Soporte respiratorio", 1.4),
    ("10", "Cuidados de la vía aérea artificial", 1.8),
    ("11", "Tratamiento para mejorar la función pulmonar", 4.4),
    ("12", "Medicación vasoactiva", 1.2),
    ("13", "Reposición intravenosa de grandes pérdidas de fluidos", 2.5),
    ("14", "Monitorización de aurícula izquierda", 1.7),
    ("15", "Reanimación cardiopulmonar en las últimas 24 h", 7.1),
    ("16", "Técnicas de hemofiltración y diálisis", 7.7),
    ("17", "Medición cuantitativa de diuresis", 7.0),
    ("18", "Medición de presión intracraneal", 1.6),
    ("19", "Tratamiento de acidosis/alcalosis metabólica complicada", 1.3),
    ("20", "Nutrición parenteral", 2.8),
    ("21", "Nutrición enteral", 1.3),
    ("22", "Intervenciones específicas en la unidad", 2.8),
    ("23", "Intervenciones específicas fuera de la unidad", 1.9),
];

/// Mutually exclusive item groups
pub const EXCLUSION_GROUPS: &[&[&str]] = &[
    &["1a", "1b", "1c"],
    &["4a", "4b", "4c"],
    &["6a", "6b", "6c"],
    &["7a", "7b"],
    &["8a", "8b", "8c"],
];

pub const FACILITIES: &[&str] = &[
    "Clínica Alemana",
    "Clínica Las Condes",
    "Clínica Santa María",
    "Clínica Dávila",
    "Clínica Indisa",
    "Hospital del Salvador",
    "Hospital Clínico Universidad de Chile",
    "Hospital Clínico UC Christus",
    "Hospital Barros Luco Trudeau",
    "Hospital Sótero del Río",
    "Hospital San Juan de Dios",
    "Hospital El Carmen de Maipú",
];
