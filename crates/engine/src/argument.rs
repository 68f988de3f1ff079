//! Sales argument generator.
//!
//! A deterministic string classifier: given the source product name and a
//! candidate name, walk an ordered decision table of
//! (source predicate, candidate predicate, sentence) rows and return the first
//! sentence whose predicates both match. No I/O, no state.

/// Keyword predicate over an uppercased product name.
#[derive(Debug)]
pub enum Pred {
    /// Matches any name.
    Always,
    /// Name contains at least one of the keywords.
    Any(&'static [&'static str]),
    /// All sub-predicates match.
    AllOf(&'static [Pred]),
    /// At least one sub-predicate matches.
    AnyOf(&'static [Pred]),
}

impl Pred {
    fn matches(&self, upper: &str) -> bool {
        match self {
            Pred::Always => true,
            Pred::Any(keywords) => keywords.iter().any(|k| upper.contains(k)),
            Pred::AllOf(preds) => preds.iter().all(|p| p.matches(upper)),
            Pred::AnyOf(preds) => preds.iter().any(|p| p.matches(upper)),
        }
    }
}

struct ArgumentRule {
    source: Pred,
    candidate: Pred,
    text: &'static str,
}

const fn rule(source: Pred, candidate: Pred, text: &'static str) -> ArgumentRule {
    ArgumentRule {
        source,
        candidate,
        text,
    }
}

/// Fallback when no category pair matches.
pub const DEFAULT_ARGUMENT: &str = "Comúnmente llevado junto a este producto";

/// Ordered first-match-wins decision table. Category-pair rows first, generic
/// candidate-only catch-alls at the bottom.
static RULES: &[ArgumentRule] = &[
    // Mouse
    rule(
        Pred::Any(&["MOUSE", "RATON"]),
        Pred::Any(&["TECLADO"]),
        "El desgaste suele ser simultáneo, renuévalos juntos",
    ),
    rule(
        Pred::Any(&["MOUSE", "RATON"]),
        Pred::Any(&["PAD", "ALFOMBRILLA"]),
        "Mejora la precisión y protege el escritorio",
    ),
    rule(
        Pred::Any(&["MOUSE", "RATON"]),
        Pred::Any(&["PILA", "BATERIA"]),
        "Energía de respaldo indispensable",
    ),
    // Keyboard
    rule(
        Pred::Any(&["TECLADO"]),
        Pred::Any(&["MOUSE"]),
        "El compañero ideal para completar el escritorio",
    ),
    rule(
        Pred::Any(&["TECLADO"]),
        Pred::Any(&["PAD", "ALFOMBRILLA"]),
        "Mayor confort para tus muñecas y mouse",
    ),
    // Laptops
    rule(
        Pred::Any(&["LAPTOP", "NOTEBOOK", "NB"]),
        Pred::Any(&["MOCHILA", "FUNDA", "MALETIN"]),
        "Protege tu inversión de golpes y caídas",
    ),
    rule(
        Pred::Any(&["LAPTOP", "NOTEBOOK", "NB"]),
        Pred::Any(&["MOUSE"]),
        "Incrementa tu productividad evitando el touchpad",
    ),
    rule(
        Pred::Any(&["LAPTOP", "NOTEBOOK", "NB"]),
        Pred::Any(&["COOLER", "BASE"]),
        "Evita sobrecalentamiento en sesiones largas",
    ),
    rule(
        Pred::Any(&["LAPTOP", "NOTEBOOK", "NB"]),
        Pred::Any(&["ANTIVIRUS", "LICENCIA"]),
        "Seguridad y software esencial desde el primer día",
    ),
    rule(
        Pred::Any(&["LAPTOP", "NOTEBOOK", "NB"]),
        Pred::Any(&["AUDIFONO", "HEADSET"]),
        "Para videollamadas con privacidad",
    ),
    // Internal components (RAM/SSD)
    rule(
        Pred::Any(&["RAM", "DDR", "SSD", "SOLID", "NVME"]),
        Pred::Any(&["SERVICIO", "INSTALACION"]),
        "El cliente no sabe colocarla correctamente (Evita errores)",
    ),
    rule(
        Pred::Any(&["RAM", "DDR", "SSD", "SOLID", "NVME"]),
        Pred::Any(&["CLONACION", "MIGRACION"]),
        "No pierde su sistema ni archivos",
    ),
    rule(
        Pred::Any(&["RAM", "DDR", "SSD", "SOLID", "NVME"]),
        Pred::Any(&["MANTENIMIENTO", "LIMPIEZA", "AIRE"]),
        "Ya que se abre la PC, se aprovecha para limpiar",
    ),
    rule(
        Pred::Any(&["RAM", "DDR", "SSD", "SOLID", "NVME"]),
        Pred::Any(&["PASTA"]),
        "Baja temperatura al procesador (aprovechando apertura)",
    ),
    rule(
        Pred::Any(&["RAM", "DDR", "SSD", "SOLID", "NVME"]),
        Pred::Any(&["DIAGNOSTICO"]),
        "Evita errores por incompatibilidad de velocidad/tipo",
    ),
    rule(
        Pred::Any(&["RAM", "DDR", "SSD", "SOLID", "NVME"]),
        Pred::Any(&["FORMATEO", "WINDOWS"]),
        "Arranque rápido y sistema limpio",
    ),
    // CPU
    rule(
        Pred::Any(&["PROCESADOR", "CPU"]),
        Pred::Any(&["PASTA"]),
        "Evita sobrecalentamiento crítico",
    ),
    rule(
        Pred::Any(&["PROCESADOR", "CPU"]),
        Pred::Any(&["COOLER", "DISIPADOR"]),
        "Disipa mejor el calor y alarga la vida útil",
    ),
    rule(
        Pred::Any(&["PROCESADOR", "CPU"]),
        Pred::Any(&["BIOS"]),
        "Para compatibilidad",
    ),
    // Power supply
    rule(
        Pred::AnyOf(&[
            Pred::AllOf(&[Pred::Any(&["FUENTE"]), Pred::Any(&["PODER"])]),
            Pred::Any(&["PSU"]),
        ]),
        Pred::Any(&["ESTABILIZADOR"]),
        "Protege de subidas de voltaje",
    ),
    rule(
        Pred::AnyOf(&[
            Pred::AllOf(&[Pred::Any(&["FUENTE"]), Pred::Any(&["PODER"])]),
            Pred::Any(&["PSU"]),
        ]),
        Pred::Any(&["UPS"]),
        "Evita apagones bruscos",
    ),
    rule(
        Pred::AnyOf(&[
            Pred::AllOf(&[Pred::Any(&["FUENTE"]), Pred::Any(&["PODER"])]),
            Pred::Any(&["PSU"]),
        ]),
        Pred::Any(&["SERVICIO"]),
        "Mal conectada quema equipos",
    ),
    // Graphics card
    rule(
        Pred::Any(&["TARJETA", "GPU"]),
        Pred::Any(&["FUENTE"]),
        "La GPU consume mucha energía (Requerido)",
    ),
    rule(
        Pred::Any(&["TARJETA", "GPU"]),
        Pred::Any(&["COOLER"]),
        "Evita sobrecalentamiento",
    ),
    // Monitor
    rule(
        Pred::Any(&["MONITOR", "PANTALLA"]),
        Pred::Any(&["SOPORTE", "STAND", "BRAZO"]),
        "Vital para la ergonomía y evitar dolor de cuello",
    ),
    rule(
        Pred::Any(&["MONITOR", "PANTALLA"]),
        Pred::Any(&["CAMARA", "WEB", "WEBCAM"]),
        "Indispensable para videollamadas de calidad",
    ),
    rule(
        Pred::Any(&["MONITOR", "PANTALLA"]),
        Pred::Any(&["ESTABILIZADOR", "SUPRESOR"]),
        "Protege el panel contra picos de voltaje",
    ),
    rule(
        Pred::Any(&["MONITOR", "PANTALLA"]),
        Pred::Any(&["LIMPIEZA"]),
        "Mantén la pantalla libre de huellas y polvo",
    ),
    // Printer
    rule(
        Pred::Any(&["IMPRESORA", "MULTIFUNCIONAL"]),
        Pred::Any(&["TINTA", "CARTUCHO", "TONER"]),
        "Asegura la continuidad de impresión con repuestos",
    ),
    rule(
        Pred::Any(&["IMPRESORA", "MULTIFUNCIONAL"]),
        Pred::Any(&["PAPEL", "RESMA"]),
        "El insumo básico para empezar a trabajar",
    ),
    rule(
        Pred::Any(&["IMPRESORA", "MULTIFUNCIONAL"]),
        Pred::AllOf(&[Pred::Any(&["CABLE"]), Pred::Any(&["USB"])]),
        "Verifica si la caja incluye el cable de conexión",
    ),
    // Audio
    rule(
        Pred::Any(&["HEADSET", "AUDIFONO", "AURICULAR"]),
        Pred::Any(&["SOPORTE", "STAND"]),
        "Evita caídas y daños en tus audífonos",
    ),
    rule(
        Pred::Any(&["HEADSET", "AUDIFONO", "AURICULAR"]),
        Pred::Any(&["ADAPTADOR", "SPLITTER"]),
        "Asegura la compatibilidad con todos tus dispositivos",
    ),
    rule(
        Pred::Any(&["HEADSET", "AUDIFONO", "AURICULAR"]),
        Pred::Any(&["WEBCAM", "CAMARA"]),
        "Ideal para reuniones o streaming de calidad",
    ),
    // Connectivity / power
    rule(
        Pred::Any(&["CARGADOR", "FUENTE", "CABLE"]),
        Pred::Any(&["SUPRESOR", "ESTABILIZADOR"]),
        "Protege tus equipos conectados de daños eléctricos",
    ),
    rule(
        Pred::Any(&["CARGADOR", "FUENTE", "CABLE"]),
        Pred::Any(&["ORGANIZADOR", "VELCRO"]),
        "Orden y seguridad para tu cableado",
    ),
    // Generic catch-alls on the candidate alone.
    rule(
        Pred::Always,
        Pred::Any(&["PILA", "BATERIA"]),
        "Energía de respaldo para no quedarse a medias",
    ),
    // Strict about USB storage so USB mice are not flagged as backup media.
    rule(
        Pred::Always,
        Pred::AnyOf(&[
            Pred::AllOf(&[
                Pred::Any(&["USB"]),
                Pred::Any(&["MEMORIA", "DRIVE", "FLASH", "KINGSTON", "SANDISK"]),
            ]),
            Pred::Any(&["PENDRIVE"]),
        ]),
        "Siempre útil para respaldar información crítica",
    ),
    rule(
        Pred::Always,
        Pred::Any(&["SUPRESOR", "ESTABILIZADOR"]),
        "Seguro de vida eléctrico para tus equipos",
    ),
    rule(
        Pred::Always,
        Pred::Any(&["LIMPIEZA", "ALCOHOL", "AIRE"]),
        "Mantenimiento preventivo para que luzca como nuevo",
    ),
    rule(
        Pred::Always,
        Pred::Any(&["PASTA TERMICA"]),
        "Mejora la disipación de calor del procesador",
    ),
];

/// Most specific canned sentence for a (source, candidate) product pair.
pub fn sales_argument(source_name: &str, candidate_name: &str) -> &'static str {
    let source = source_name.to_uppercase();
    let candidate = candidate_name.to_uppercase();

    RULES
        .iter()
        .find(|r| r.source.matches(&source) && r.candidate.matches(&candidate))
        .map(|r| r.text)
        .unwrap_or(DEFAULT_ARGUMENT)
}
