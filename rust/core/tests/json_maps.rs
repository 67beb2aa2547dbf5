// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sector_tess_core::{Error, MapData};

const DONUT: &str = r#"{
    "name": "DONUT",
    "vertices": [
        {"x": 0, "y": 0}, {"x": 256, "y": 0}, {"x": 256, "y": 256}, {"x": 0, "y": 256},
        {"x": 96, "y": 96}, {"x": 160, "y": 96}, {"x": 160, "y": 160}, {"x": 96, "y": 160}
    ],
    "linedefs": [
        {"start": 0, "end": 1, "front": 0},
        {"start": 1, "end": 2, "front": 0},
        {"start": 2, "end": 3, "front": 0},
        {"start": 3, "end": 0, "front": 0},
        {"start": 4, "end": 5, "front": 1, "back": 2},
        {"start": 5, "end": 6, "front": 1, "back": 2},
        {"start": 6, "end": 7, "front": 1, "back": 2},
        {"start": 7, "end": 4, "front": 1, "back": 2}
    ],
    "sidedefs": [{"sector": 0}, {"sector": 0}, {"sector": 1}],
    "sectors": [
        {"floor_height": 0, "ceiling_height": 128, "light_level": 192},
        {"floor_height": 32, "ceiling_height": 96}
    ],
    "things": [
        {"x": 32, "y": 32, "type": 1, "angle": 90},
        {"x": 128, "y": 128, "type": 2014}
    ]
}"#;

#[test]
fn test_load_donut_map() {
    let map = MapData::from_json(DONUT).unwrap();

    assert_eq!(map.name, "DONUT");
    assert_eq!(map.vertices.len(), 8);
    assert_eq!(map.sector_count(), 2);
    assert_eq!(map.things.len(), 2);
    assert_eq!(map.things[1].kind, 2014);
    assert_eq!(map.sectors[1].light_level, 160);
    assert_eq!(map.sectors[0].light_level, 192);

    // Outer walls plus the inner pillar's faces all bound sector 0.
    assert_eq!(map.sector_linedefs(0).unwrap().len(), 8);
    assert_eq!(map.sector_linedefs(1).unwrap().len(), 4);
}

#[test]
fn test_missing_back_side_variants() {
    let map = MapData::from_json(DONUT).unwrap();
    assert!(map.linedefs.iter().take(4).all(|l| l.back.is_none()));
}

#[test]
fn test_invalid_json_is_reported() {
    let result = MapData::from_json("{ \"vertices\": [");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_dangling_sidedef_is_rejected() {
    let json = r#"{
        "vertices": [{"x": 0, "y": 0}, {"x": 1, "y": 0}],
        "linedefs": [{"start": 0, "end": 1, "front": 3}],
        "sidedefs": [{"sector": 0}],
        "sectors": [{}]
    }"#;
    assert!(matches!(
        MapData::from_json(json),
        Err(Error::SidedefOutOfRange { sidedef: 3, .. })
    ));
}
