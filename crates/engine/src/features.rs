//! Short bullet "features" derived from free-text product descriptions.

/// Delimiters that separate feature segments in storefront copy.
const DELIMITERS: [char; 4] = ['\n', ';', '|', '•'];

/// Maximum features shown per product.
const MAX_FEATURES: usize = 5;

/// Split a description into display features.
///
/// Keeps trimmed segments longer than 2 and shorter than 60 characters that do
/// not look like URLs, capped at 5. Blank input yields an empty list.
pub fn extract_features(description: &str) -> Vec<String> {
    if description.trim().is_empty() {
        return Vec::new();
    }

    description
        .split(DELIMITERS)
        .map(str::trim)
        .filter(|segment| {
            let len = segment.chars().count();
            len > 2 && len < 60 && !segment.starts_with("http")
        })
        .take(MAX_FEATURES)
        .map(str::to_string)
        .collect()
}

fn contains_any(upper: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| upper.contains(t))
}

/// Derive a single descriptive tag from the product name.
///
/// Display fallback for products whose description yields no features; not a
/// correctness-critical path.
pub fn mock_features(name: &str) -> Vec<String> {
    let upper = name.to_uppercase();

    let tag = if contains_any(&upper, &["PROCESADOR", "CPU", "CORE", "RYZEN"]) {
        processor_tier(&upper)
    } else if upper.contains("MOUSE") {
        if upper.contains("GAMER") {
            "Sensor Óptico Gamer"
        } else {
            "Diseño Ergonómico"
        }
    } else if upper.contains("TECLADO") {
        if upper.contains("MECANICO") {
            "Switches Mecánicos Durables"
        } else {
            "Escritura Silenciosa"
        }
    } else if contains_any(&upper, &["MONITOR", "PANTALLA"]) {
        monitor_tag(&upper)
    } else if contains_any(&upper, &["SSD", "DISK"]) {
        "Carga Rápida de Sistema"
    } else {
        "Calidad Recomendada"
    };

    vec![tag.to_string()]
}

/// Ordered tier table, most specific first.
fn processor_tier(upper: &str) -> &'static str {
    const TIERS: &[(&str, &str)] = &[
        ("I9", "Rendimiento Extremo: Core i9"),
        ("I7", "Alto Rendimiento: Core i7"),
        ("I5", "Rendimiento Equilibrado: Core i5"),
        ("I3", "Uso Básico: Core i3"),
        ("RYZEN 9", "Multitarea Pesada: Ryzen 9"),
        ("RYZEN 7", "Gaming/Streaming: Ryzen 7"),
        ("RYZEN 5", "Gaming Calidad/Precio: Ryzen 5"),
        ("RYZEN 3", "Ofimática: Ryzen 3"),
    ];

    TIERS
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map(|(_, tag)| *tag)
        .unwrap_or("Procesador de Escritorio")
}

fn monitor_tag(upper: &str) -> &'static str {
    if contains_any(upper, &["144HZ", "165HZ"]) {
        "Alta Fluidez Gaming"
    } else if upper.contains("4K") {
        "Ultra Alta Definición"
    } else if upper.contains("IPS") {
        "Colores Vivos (IPS)"
    } else {
        "Pantalla Nítida"
    }
}
