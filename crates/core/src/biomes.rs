//! Biome extraction from planet payloads.

use std::collections::HashSet;

use serde_json::Value;

/// Collect the unique `biome` objects found across `planets`.
///
/// Biomes are deduplicated by their `name`; the first occurrence wins and
/// input order is preserved. A planet whose `biome` is not an object, or an
/// object without a `name`, is skipped.
pub fn unique_biomes<'a, I>(planets: I) -> Vec<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut seen = HashSet::new();
    let mut biomes = Vec::new();

    for planet in planets {
        let Some(biome) = planet.get("biome").filter(|b| b.is_object()) else {
            continue;
        };
        let Some(name) = biome.get("name").filter(|n| !n.is_null()) else {
            continue;
        };
        if seen.insert(name.to_string()) {
            biomes.push(biome.clone());
        }
    }

    biomes
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deduplicates_by_name() {
        let planets = [
            json!({"index": 0, "biome": {"name": "Desert", "description": "Hot"}}),
            json!({"index": 1, "biome": {"name": "Desert", "description": "Hotter"}}),
            json!({"index": 2, "biome": {"name": "Ice"}}),
        ];
        let biomes = unique_biomes(&planets);
        assert_eq!(biomes.len(), 2);
        assert_eq!(biomes[0], json!({"name": "Desert", "description": "Hot"}));
        assert_eq!(biomes[1]["name"], "Ice");
    }

    #[test]
    fn skips_non_object_and_missing_biomes() {
        let planets = [
            json!({"index": 0, "biome": "string-biome-not-dict"}),
            json!({"index": 1}),
            json!({"index": 2, "biome": {"description": "nameless"}}),
            json!({"index": 3, "biome": null}),
        ];
        assert!(unique_biomes(&planets).is_empty());
    }
}
