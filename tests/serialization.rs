mod common;
use common::*;
use serde_json::json;

#[test]
fn search_params_serialize_with_tagged_filters() {
    let params = params("opensand -e -a Camellia c>10 c<20 cs>=2");
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(
        value,
        json!({
            "username": "opensand",
            "exact": true,
            "query": null,
            "artist": "Camellia",
            "title": null,
            "playcount": {
                "type": "between",
                "min": { "operator": "greater", "value": 10.0 },
                "max": { "operator": "less", "value": 20.0 }
            },
            "beatmap": {
                "circle_size": { "type": "single", "operator": "greater_or_equal", "value": 2.0 },
                "bpm": null,
                "length": null,
                "drain": null,
                "overall_difficulty": null,
                "approach_rate": null,
                "star_rating": null
            }
        })
    );
}
