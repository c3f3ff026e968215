//! Static list of canton names for synchronous enumeration.

/// Cantons of Guayas, in display order.
pub const KNOWN_CANTONS: [&str; 24] = [
    "Guayaquil",
    "Alfredo Baquerizo Moreno",
    "Balao",
    "Balzar",
    "Colimes",
    "Daule",
    "Durán",
    "El Empalme",
    "El Triunfo",
    "General Antonio Elizalde",
    "Isidro Ayora",
    "Lomas de Sargentillo",
    "Marcelino Maridueña",
    "Milagro",
    "Naranjal",
    "Naranjito",
    "Nobol",
    "Palestina",
    "Pedro Carbo",
    "Playas",
    "Salitre",
    "Samborondón",
    "Santa Lucía",
    "Simón Bolívar",
];

pub fn list_known_canton_names() -> &'static [&'static str] {
    &KNOWN_CANTONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_distinct() {
        let names = list_known_canton_names();
        assert_eq!(names.len(), 24);
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), 24);
        assert_eq!(names[0], "Guayaquil");
    }
}
