//! Canonical mapping between [`FilterState`] and a URL query string.
//!
//! Parameters are always emitted in the order `time, cuisine, taste,
//! ingredients` and unset fields are left out, so equal states always encode
//! to the same string. Decoding never fails: anything it doesn't understand
//! is treated as "no filter".

use url::form_urlencoded;

use super::{non_blank, FilterField, FilterState, IngredientList};

/// Encode a filter state. An empty state encodes to an empty string.
pub fn encode(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(time) = state.time {
        serializer.append_pair("time", &time.to_string());
    }
    if let Some(cuisine) = &state.cuisine {
        serializer.append_pair("cuisine", cuisine);
    }
    if let Some(taste) = &state.taste {
        serializer.append_pair("taste", taste);
    }
    if !state.ingredients.is_empty() {
        serializer.append_pair("ingredients", &state.ingredients.to_csv());
    }
    serializer.finish()
}

/// Decode a query string (with or without a leading `?`).
///
/// Unknown parameters are ignored. A repeated parameter keeps its last value.
pub fn decode(query: &str) -> FilterState {
    let mut state = FilterState::default();
    for (key, value) in form_urlencoded::parse(strip_question_mark(query).as_bytes()) {
        match FilterField::from_str(&key) {
            Some(FilterField::Time) => state.time = value.trim().parse().ok(),
            Some(FilterField::Cuisine) => state.cuisine = non_blank(&value),
            Some(FilterField::Taste) => state.taste = non_blank(&value),
            Some(FilterField::Ingredients) => state.ingredients = IngredientList::from_csv(&value),
            None => {}
        }
    }
    state
}

/// Decode, drop one field, re-encode.
pub fn remove_field(query: &str, field: FilterField) -> String {
    let mut state = decode(query);
    state.clear(field);
    encode(&state)
}

/// Decode, drop one ingredient, re-encode.
pub fn remove_ingredient(query: &str, ingredient: &str) -> String {
    let mut state = decode(query);
    state.ingredients.remove(ingredient);
    encode(&state)
}

/// Encode the free-text search route's query. Blank text encodes to nothing.
pub fn encode_search(text: &str) -> String {
    match non_blank(text) {
        Some(text) => form_urlencoded::Serializer::new(String::new())
            .append_pair("query", text.trim())
            .finish(),
        None => String::new(),
    }
}

/// Read the search text from a query string. Older links used `q`.
pub fn decode_search(query: &str) -> Option<String> {
    let mut legacy = None;
    for (key, value) in form_urlencoded::parse(strip_question_mark(query).as_bytes()) {
        match &*key {
            "query" => return non_blank(&value).map(|v| v.trim().to_string()),
            "q" if legacy.is_none() => legacy = non_blank(&value).map(|v| v.trim().to_string()),
            _ => {}
        }
    }
    legacy
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FilterState {
        FilterState::new()
            .with_time(30)
            .with_cuisine("Italian")
            .with_ingredient("egg")
            .with_ingredient("rice")
    }

    #[test]
    fn test_empty_state_encodes_to_empty_string() {
        assert_eq!(encode(&FilterState::default()), "");
        assert_eq!(decode(""), FilterState::default());
        assert_eq!(decode("?"), FilterState::default());
    }

    #[test]
    fn test_encode_canonical_order() {
        assert_eq!(
            encode(&sample()),
            "time=30&cuisine=Italian&ingredients=egg%2Crice"
        );

        let reordered = FilterState::new()
            .with_ingredient("egg")
            .with_ingredient("rice")
            .with_cuisine("Italian")
            .with_time(30);
        assert_eq!(encode(&reordered), encode(&sample()));
    }

    #[test]
    fn test_round_trip() {
        let states = [
            FilterState::default(),
            sample(),
            FilterState::new().with_taste("spicy"),
            FilterState::new()
                .with_cuisine("Brazilian")
                .with_taste("sweet & sour")
                .with_ingredient("olive oil")
                .with_ingredient("crème fraîche"),
            FilterState::new().with_time(0),
        ];
        for state in states {
            assert_eq!(decode(&encode(&state)), state, "round trip of {:?}", state);
        }
    }

    #[test]
    fn test_decode_accepts_leading_question_mark_and_unknown_params() {
        let state = decode("?time=30&cuisine=Italian&difficulty=easy&page=2");
        assert_eq!(state, FilterState::new().with_time(30).with_cuisine("Italian"));
    }

    #[test]
    fn test_decode_is_defensive() {
        let state = decode("time=soon&cuisine=&taste=&ingredients=,,&=&&%ZZ");
        assert_eq!(state, FilterState::default());

        let state = decode("time=-5");
        assert_eq!(state.time, None);
    }

    #[test]
    fn test_decode_trims_padded_values() {
        let state = decode("cuisine=+Italian+&taste=%20sweet");
        assert_eq!(state.cuisine.as_deref(), Some("Italian"));
        assert_eq!(state.taste.as_deref(), Some("sweet"));
        assert_eq!(encode(&state), "cuisine=Italian&taste=sweet");
    }

    #[test]
    fn test_decode_ingredients_dedup_keeps_first_seen_order() {
        let state = decode("ingredients=rice%2Cegg%2Crice%2C%2Cmilk");
        assert_eq!(state.ingredients.as_slice(), ["rice", "egg", "milk"]);

        // Unencoded commas work too
        let state = decode("ingredients=rice,egg");
        assert_eq!(state.ingredients.as_slice(), ["rice", "egg"]);
    }

    #[test]
    fn test_encode_escapes_unsafe_characters() {
        let state = FilterState::new().with_cuisine("Tex-Mex & BBQ");
        let encoded = encode(&state);
        assert_eq!(encoded, "cuisine=Tex-Mex+%26+BBQ");
        assert_eq!(decode(&encoded), state);
    }

    #[test]
    fn test_remove_field_leaves_others() {
        assert_eq!(
            remove_field("time=30&cuisine=Italian", FilterField::Cuisine),
            "time=30"
        );
        assert_eq!(remove_field("time=30", FilterField::Time), "");
        assert_eq!(
            remove_field("cuisine=Italian", FilterField::Taste),
            "cuisine=Italian"
        );
    }

    #[test]
    fn test_remove_ingredient() {
        assert_eq!(
            remove_ingredient("time=30&ingredients=egg%2Crice", "egg"),
            "time=30&ingredients=rice"
        );
        assert_eq!(remove_ingredient("ingredients=egg", "egg"), "");
        assert_eq!(
            remove_ingredient("ingredients=egg", "milk"),
            "ingredients=egg"
        );
    }

    #[test]
    fn test_search_query() {
        assert_eq!(encode_search("chicken curry"), "query=chicken+curry");
        assert_eq!(encode_search("   "), "");
        assert_eq!(
            decode_search("?query=chicken+curry"),
            Some("chicken curry".to_string())
        );
        assert_eq!(decode_search("q=soup"), Some("soup".to_string()));
        assert_eq!(decode_search("q=soup&query=stew"), Some("stew".to_string()));
        assert_eq!(decode_search("query="), None);
    }
}
