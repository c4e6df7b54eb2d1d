use descmap_compiler::error::GeneratorError;
use descmap_compiler::output::source_map::{SourceMap, SourceMapGenerator, VERSION};
use descmap_compiler::output::{Record, Segment, SourcePosition};

#[path = "source_map_util.rs"]
mod source_map_util;

#[cfg(test)]
mod tests {
    use super::source_map_util::decode_deltas;
    use super::*;

    /// Adds a line of `(col, line, column)` mappings into `a.js`, 0-indexed
    /// as in the reference output, shifted to the 1-indexed API.
    fn add_line(map: &mut SourceMapGenerator, mappings: &[(i64, i64, i64)]) {
        map.add_line();
        for &(col, line, column) in mappings {
            map.add_mapping(col + 1, Some(("a.js", line + 1, column + 1)), None)
                .unwrap();
        }
    }

    #[test]
    fn should_generate_a_valid_source_map() {
        let mut map = SourceMapGenerator::new(Some("out.js".to_string()));
        map.add_source("a.js");
        add_line(&mut map, &[(0, 0, 0), (4, 0, 6), (5, 0, 7), (8, 0, 22), (9, 0, 23), (10, 0, 24)]);
        add_line(&mut map, &[(0, 1, 0), (4, 1, 6), (5, 1, 7), (8, 1, 10), (9, 1, 11), (10, 1, 12)]);
        add_line(
            &mut map,
            &[(0, 3, 0), (2, 3, 2), (3, 3, 3), (10, 3, 10), (11, 3, 11), (21, 3, 11), (22, 3, 12)],
        );
        add_line(
            &mut map,
            &[
                (4, 4, 4),
                (11, 4, 11),
                (12, 4, 12),
                (15, 4, 15),
                (16, 4, 16),
                (21, 4, 21),
                (22, 4, 22),
                (23, 4, 23),
            ],
        );
        add_line(&mut map, &[(0, 5, 0), (1, 5, 1), (2, 5, 2), (3, 5, 2)]);

        let json = map.to_source_map().unwrap();
        // Generated with https://sokra.github.io/source-map-visualization using a TS source map
        assert_eq!(json.mappings, "AAAA,IAAM,CAAC,GAAe,CAAC,CAAC;AACxB,IAAM,CAAC,GAAG,CAAC,CAAC;AAEZ,EAAE,CAAC,OAAO,CAAC,UAAA,CAAC;IACR,OAAO,CAAC,GAAG,CAAC,KAAK,CAAC,CAAC;AACvB,CAAC,CAAC,CAAA");
    }

    #[test]
    fn should_include_the_files_in_first_appearance_order() {
        let mut map = SourceMapGenerator::new(Some("out.js".to_string()));
        map.add_source("url.ts")
            .add_source("inline.ts")
            .add_source("url.ts") // make sure the sources are dedup
            .add_line()
            .add_mapping(1, Some(("inline.ts", 1, 1)), None)
            .unwrap();

        let json = map.to_source_map().unwrap();
        assert_eq!(json.file, "out.js");
        assert_eq!(json.sources, vec!["url.ts", "inline.ts"]);
        // inline.ts is the second source: delta 1 from the initial index 0
        assert_eq!(json.mappings, "ACAA");
    }

    #[test]
    fn should_collect_sorted_names() {
        let mut map = SourceMapGenerator::new(None);
        map.add_source("a.ts").add_line();
        map.add_mapping(1, Some(("a.ts", 1, 1)), Some("zebra"))
            .unwrap()
            .add_mapping(4, Some(("a.ts", 1, 4)), Some("apple"))
            .unwrap()
            .add_mapping(8, Some(("a.ts", 1, 8)), Some("zebra"))
            .unwrap();

        let json = map.to_source_map().unwrap();
        assert_eq!(json.file, "");
        assert_eq!(json.names, vec!["apple", "zebra"]);
        assert_eq!(
            decode_deltas(&json.mappings),
            vec![vec![vec![0, 0, 0, 0, 1], vec![3, 0, 0, 3, -1], vec![4, 0, 0, 4, 1]]]
        );
    }

    #[test]
    fn should_emit_line_breaks_between_lines() {
        let mut map = SourceMapGenerator::new(None);
        map.add_source("a.ts").add_line().add_line().add_line();
        map.add_mapping(2, None, None).unwrap();

        assert_eq!(
            map.records(),
            &[
                Record::LineBreak,
                Record::LineBreak,
                Record::Segment(Segment::generated(2)),
            ]
        );
        assert_eq!(map.to_source_map().unwrap().mappings, ";;C");
    }

    #[test]
    fn should_error_when_mappings_are_added_out_of_order() {
        let mut gen = SourceMapGenerator::new(Some("out.js".to_string()));
        gen.add_source("in.js").add_line();
        gen.add_mapping(10, Some(("in.js", 1, 1)), None).unwrap();
        let res = gen.add_mapping(1, Some(("in.js", 1, 1)), None);
        assert_eq!(res.err(), Some(GeneratorError::OutOfOrder));
    }

    #[test]
    fn should_error_when_adding_segments_before_any_line_is_created() {
        let mut gen = SourceMapGenerator::new(Some("out.js".to_string()));
        gen.add_source("in.js");
        let res = gen.add_mapping(1, Some(("in.js", 1, 1)), None);
        assert_eq!(res.err(), Some(GeneratorError::NoLine));
    }

    #[test]
    fn should_error_when_adding_segments_referencing_unknown_sources() {
        let mut gen = SourceMapGenerator::new(Some("out.js".to_string()));
        gen.add_source("in.js").add_line();
        let err = gen.add_mapping(1, Some(("in_.js", 1, 1)), None).err();
        assert_eq!(
            err,
            Some(GeneratorError::UnknownSource("in_.js".to_string()))
        );
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("Unknown source file \"in_.js\"")
        );
    }

    #[test]
    fn should_error_when_a_name_has_no_source() {
        let mut gen = SourceMapGenerator::new(None);
        gen.add_line();
        let res = gen.add_mapping(1, None, Some("orphan"));
        assert_eq!(res.err(), Some(GeneratorError::NameWithoutSource));
    }

    #[test]
    fn should_serialize_the_document_fields_in_order() {
        let map = SourceMap::from_records(
            Some("out.js".to_string()),
            vec!["a.js".to_string()],
            ["foo"],
            &[Record::Segment(Segment::named(1, SourcePosition::new(1, 1, 1), "foo"))],
        )
        .unwrap();

        assert_eq!(map.version, VERSION);
        assert_eq!(
            map.to_json_string(false).unwrap(),
            r#"{"version":3,"file":"out.js","sourceRoot":"","sources":["a.js"],"names":["foo"],"mappings":"AAAAA"}"#
        );

        let pretty = map.to_json_string(true).unwrap();
        assert!(pretty.starts_with("{\n  \"version\": 3,\n  \"file\": \"out.js\""));
        let parsed: SourceMap = serde_json::from_str(&pretty).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn should_use_empty_file_when_no_output_is_given() {
        let map = SourceMap::from_records(None, Vec::new(), Vec::<String>::new(), &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&map.to_json_string(false).unwrap()).unwrap();

        assert_eq!(value["file"], "");
        assert_eq!(value["sourceRoot"], "");
        assert_eq!(value["mappings"], "");
        assert_eq!(value["names"], serde_json::json!([]));
    }
}
