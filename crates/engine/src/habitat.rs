//! Habitat rule engine.
//!
//! A habitat is a lexical category of product (mouse, monitor, RAM, ...) that
//! selects a fixed, ordered list of complement rules. Classification walks an
//! ordered table of keyword sets, first match wins; laptop-family habitats
//! come first because their keywords overlap with accessory names. An
//! unmatched name yields no rules, never an error.

/// One cross-sell rule: alternate search terms (tried in order), the canned
/// reason shown to the seller, and how many candidates this rule wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplementRule {
    pub terms: &'static [&'static str],
    pub reason: &'static str,
    pub count: usize,
}

const fn rule(terms: &'static [&'static str], reason: &'static str) -> ComplementRule {
    ComplementRule {
        terms,
        reason,
        count: 1,
    }
}

const fn rule_n(
    terms: &'static [&'static str],
    reason: &'static str,
    count: usize,
) -> ComplementRule {
    ComplementRule {
        terms,
        reason,
        count,
    }
}

/// A lexical product category with its complement plan.
///
/// `plan` receives the full product name so habitats can branch on secondary
/// attributes (gamer vs. plain mouse, wireless needing batteries).
pub struct Habitat {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    plan: fn(&str) -> Vec<ComplementRule>,
}

pub(crate) fn contains_any(text: &str, terms: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }
    let upper = text.to_uppercase();
    terms.iter().any(|t| upper.contains(&t.to_uppercase()))
}

static LAPTOP_RULES: &[ComplementRule] = &[
    rule(&["MOUSE INALAMBRICO"], "Mayor comodidad que el touchpad"),
    rule(
        &["MOCHILA", "MALETIN", "FUNDA"],
        "Protección para el transporte diario",
    ),
    rule(
        &["COOLER", "BASE"],
        "Mejora la refrigeración en uso prolongado",
    ),
    // "OFFICE" used to be a term here but it matched "CASE OFFICE".
    rule(
        &["LICENCIA", "MICROSOFT", "WINDOWS", "ANTIVIRUS", "KASPERSKY", "ESET"],
        "Software esencial desde el primer día",
    ),
];

static MOUSE_GAMER_RULES: &[ComplementRule] = &[
    rule_n(
        &["TECLADO GAMER", "TECLADO MECANICO"],
        "Completa tu setup gaming para mejor rendimiento",
        3,
    ),
    rule(
        &["PAD GAMER", "ALFOMBRILLA GAMER"],
        "Superficie de control y velocidad para tu sensor",
    ),
    rule(&["AUDIFONO GAMER", "HEADSET"], "Inmersión total en tus partidas"),
];

static MOUSE_PLAIN_RULES: &[ComplementRule] = &[
    rule_n(
        &["TECLADO"],
        "Renovación conjunta: El desgaste suele ser simultáneo",
        3,
    ),
    rule(
        &["PAD", "ALFOMBRILLA"],
        "Mejora el deslizamiento y protege el escritorio",
    ),
];

static MOUSE_BATTERY_RULE: ComplementRule = rule(
    &["PILA", "BATERIA"],
    "Energía de respaldo para no quedarte desconectado",
);

fn mouse_plan(name: &str) -> Vec<ComplementRule> {
    let gamer = contains_any(name, &["GAMER", "GAMING", "RGB"]);
    let wireless = contains_any(name, &["INALAMBRICO", "BLUETOOTH", "WIFI", "WIRELESS"]);
    let rechargeable = contains_any(name, &["RECARGABLE", "BATERIA INTERNA"]);

    let mut rules: Vec<ComplementRule> = if gamer {
        MOUSE_GAMER_RULES.to_vec()
    } else {
        MOUSE_PLAIN_RULES.to_vec()
    };

    if wireless && !rechargeable {
        rules.push(MOUSE_BATTERY_RULE);
    }
    rules
}

static INK_RULES: &[ComplementRule] = &[
    rule(
        &["PAPEL BOND", "RESMA"],
        "Insumo básico para imprimir sin interrupciones",
    ),
    rule(
        &["KIT LIMPIEZA", "LIMPIEZA"],
        "Prolonga la vida útil del cabezal de impresión",
    ),
    rule(&["FOTOGRAFIC"], "Para impresiones de alta calidad"),
];

static MONITOR_RULES: &[ComplementRule] = &[
    rule(&["STAND", "SOPORTE"], "Evita dolor de cuello (Ergonomía)"),
    rule(
        &["CAMARA", "WEB", "WEBCAM"],
        "Indispensable para videollamadas claras",
    ),
    rule(
        &["PARLANTE", "HEADSET", "AUDIFONO"],
        "Muchos monitores no traen sonido integrado",
    ),
    rule(&["ESTABILIZADOR"], "Protege tu inversión de subidas de luz"),
];

static RAM_RULES: &[ComplementRule] = &[
    rule(
        &["SERVICIO", "INSTALACION", "SOPORTE TECNICO"],
        "El cliente no sabe colocarla correctamente (Evita errores)",
    ),
    rule(
        &["MANTENIMIENTO", "LIMPIEZA PC", "AIRE COMPRIMIDO"],
        "Ya que se abre la PC, limpieza preventiva",
    ),
    rule(
        &["PASTA TERMICA"],
        "Baja temperatura al procesador (aprovechando apertura)",
    ),
    rule(
        &["DIAGNOSTICO"],
        "Evita errores por incompatibilidad de velocidad/tipo",
    ),
];

static STORAGE_RULES: &[ComplementRule] = &[
    rule(&["CLONACION", "MIGRACION"], "No pierde su sistema ni archivos"),
    rule(
        &["FORMATEO", "INSTALACION WINDOWS"],
        "Arranque rápido y sistema limpio",
    ),
    rule(
        &["MANTENIMIENTO", "LIMPIEZA PC"],
        "Aprovecha la apertura del equipo",
    ),
    rule(
        &["CABLE SATA", "ADAPTADOR"],
        "Necesario para compatibilidad de conexión",
    ),
    rule(
        &["ENCLOSURE", "COFRE", "CADDY"],
        "Convierte el disco antiguo en uno externo portátil",
    ),
];

static CPU_RULES: &[ComplementRule] = &[
    rule(&["PASTA TERMICA"], "Evita sobrecalentamiento crítico"),
    rule(
        &["COOLER", "DISIPADOR", "LIQUIDA"],
        "Disipa mejor el calor y alarga la vida útil",
    ),
    rule(
        &["ACTUALIZACION BIOS", "SERVICIO"],
        "Necesario para asegurar compatibilidad de placa",
    ),
    rule(&["LIMPIEZA"], "Mejor flujo de aire interno"),
];

static PSU_RULES: &[ComplementRule] = &[
    rule(&["ESTABILIZADOR"], "Protege de subidas de voltaje"),
    rule(&["UPS", "NO BREAK"], "Evita apagones bruscos que dañan la PC"),
    rule(
        &["SERVICIO", "INSTALACION"],
        "Una fuente mal conectada puede quemar equipos",
    ),
];

static GPU_RULES: &[ComplementRule] = &[
    rule(
        &["FUENTE", "CERTIFICADA"],
        "La GPU consume mucha energía, asegura potencia",
    ),
    rule(&["COOLER"], "Mejora el flujo de aire del case"),
    rule(&["PASTA TERMICA"], "Baja temperaturas generales del sistema"),
    rule(
        &["SERVICIO"],
        "Instalación y drivers optimizados para rendimiento",
    ),
];

static CASE_RULES: &[ComplementRule] = &[
    rule(&["MOUSE INALAMBRICO"], "Mayor comodidad que el touchpad"),
    rule(&["COOLER", "BASE"], "Evita sobrecalentamiento"),
];

static EXTERNAL_DRIVE_RULES: &[ComplementRule] = &[
    rule(
        &["ESTUCHE", "FUNDA"],
        "Protección contra golpes (Datos seguros)",
    ),
    rule(&["CABLE", "ADAPTADOR"], "Conectividad asegurada"),
    rule(&["ANTIVIRUS"], "Evita infectar tus archivos de respaldo"),
];

static PRINTER_RULES: &[ComplementRule] = &[
    rule(
        &["TINTA", "BOTELLA", "TONER"],
        "Asegura la continuidad de impresión",
    ),
    rule(&["PAPEL", "RESMA"], "Papel necesario para empezar a trabajar"),
    rule(
        &["SUPRESOR", "ESTABILIZADOR"],
        "Protección eléctrica para el equipo",
    ),
];

static HUB_RULES: &[ComplementRule] = &[
    rule(
        &["CABLE", "HDMI", "USB"],
        "Asegura la longitud necesaria para tu conexión",
    ),
    rule(
        &["CINTILLO", "VELCRO", "ORGANIZADOR"],
        "Mantén tus cables ordenados",
    ),
];

static POWER_RULES: &[ComplementRule] = &[
    rule(
        &["SUPRESOR", "PICO"],
        "Protección esencial contra fluctuaciones eléctricas",
    ),
    rule(
        &["ADAPTADOR ENCHUFE"],
        "Compatibilidad con tomas de corriente",
    ),
];

static NETWORK_RULES: &[ComplementRule] = &[
    rule(&["CONECTOR", "RJ45"], "Insumos necesarios para el cableado"),
    rule(
        &["SWITCH", "ROUTER"],
        "Expande tu red si necesitas más puntos",
    ),
];

static AUDIO_RULES: &[ComplementRule] = &[
    rule(
        &["SOPORTE", "STAND"],
        "Cuida tus audífonos y mantén el orden del escritorio",
    ),
    rule(
        &["ADAPTADOR AUDIO", "SPLITTER", "CABLE"],
        "Mayor compatibilidad con PC y consolas",
    ),
    rule(
        &["CAMARA", "WEBCAM"],
        "Completa tu setup de comunicación/streaming",
    ),
];

macro_rules! fixed_plan {
    ($rules:ident) => {
        |_name: &str| $rules.to_vec()
    };
}

/// Ordered habitat table; classification is first-match-wins top to bottom.
static HABITATS: &[Habitat] = &[
    Habitat {
        name: "laptop",
        keywords: &["LAPTOP", "NOTEBOOK", "NB "],
        plan: fixed_plan!(LAPTOP_RULES),
    },
    Habitat {
        name: "mouse",
        keywords: &["MOUSE", "RATON"],
        plan: mouse_plan,
    },
    Habitat {
        name: "ink",
        keywords: &["TINTA", "CARTUCHO", "TONER"],
        plan: fixed_plan!(INK_RULES),
    },
    Habitat {
        name: "monitor",
        keywords: &["MONITOR", "PANTALLA"],
        plan: fixed_plan!(MONITOR_RULES),
    },
    Habitat {
        name: "ram",
        keywords: &["RAM", "DDR", "DIMM", "SODIMM"],
        plan: fixed_plan!(RAM_RULES),
    },
    Habitat {
        name: "storage",
        keywords: &["SSD", "SOLID", "SOLIDO", "NVME", "M.2", "DISCO DURO", "HDD"],
        plan: fixed_plan!(STORAGE_RULES),
    },
    Habitat {
        name: "cpu",
        keywords: &["PROCESADOR", "CPU", "RYZEN", "INTEL", "CORE I", "ATHLON"],
        plan: fixed_plan!(CPU_RULES),
    },
    Habitat {
        name: "psu",
        keywords: &["FUENTE", "PODER", "PSU", "WATTS", "REAL"],
        plan: fixed_plan!(PSU_RULES),
    },
    Habitat {
        name: "gpu",
        keywords: &["TARJETA VIDEO", "TARJETA GRAFICA", "GPU", "RTX", "GTX", "RADEON"],
        plan: fixed_plan!(GPU_RULES),
    },
    Habitat {
        name: "laptop-case",
        keywords: &["ESTUCHE", "FUNDA", "MALETIN", "MOCHILA"],
        plan: fixed_plan!(CASE_RULES),
    },
    Habitat {
        name: "external-drive",
        keywords: &["EXTERNO"],
        plan: fixed_plan!(EXTERNAL_DRIVE_RULES),
    },
    Habitat {
        name: "printer",
        keywords: &["IMPRESORA", "MULTIFUNCIONAL"],
        plan: fixed_plan!(PRINTER_RULES),
    },
    Habitat {
        name: "hub",
        keywords: &["HUB", "ADAPTADOR", "CONVERTIDOR", "EXTENSION USB"],
        plan: fixed_plan!(HUB_RULES),
    },
    Habitat {
        name: "power",
        keywords: &["CARGADOR", "FUENTE", "CABLE PODER", "BATERIA PORTATIL"],
        plan: fixed_plan!(POWER_RULES),
    },
    Habitat {
        name: "network",
        keywords: &["CABLE RED", "UTP", "PATCH CORD", "CAT5", "CAT6"],
        plan: fixed_plan!(NETWORK_RULES),
    },
    Habitat {
        name: "audio",
        keywords: &["HEADSET", "AUDIFONO", "AURICULAR", "MICROFONO"],
        plan: fixed_plan!(AUDIO_RULES),
    },
];

/// Classify a product name into at most one habitat.
pub fn classify(name: &str) -> Option<&'static Habitat> {
    HABITATS.iter().find(|h| contains_any(name, h.keywords))
}

/// The ordered complement rules for a product name; empty when no habitat
/// matches.
pub fn plan_for(name: &str) -> Vec<ComplementRule> {
    classify(name).map(|h| (h.plan)(name)).unwrap_or_default()
}
