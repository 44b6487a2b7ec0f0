//! End-to-end decoding scenarios.

use super::fixtures::*;
use crate::common::DecodeError;
use crate::project::{ColorDepth, Composition, ItemKind, LayerFlags, LayerQuality, Project, decode};
use crate::text::{Justification, TextSource, extract_all_text_layers, recover_text};
use memchr::memmem;

fn hello_project() -> Vec<u8> {
    ProjectFixture::new()
        .composition(
            1,
            "Main",
            &[text_layer("Greeting", &utf16z("Hello")), plain_layer("Background", 0)],
        )
        .build()
}

/// Rename the first chunk tagged `tag` and return its offset.
fn retag(data: &mut [u8], tag: &[u8; 4], with: &[u8; 4]) -> usize {
    let at = memmem::find(data, tag).expect("tag present");
    data[at..at + 4].copy_from_slice(with);
    at
}

fn main_comp(project: &Project) -> &Composition {
    project.item(1).and_then(|i| i.as_composition()).expect("composition")
}

#[test]
fn hello_text_layer_round_trip() {
    let project = decode(&hello_project()).expect("decode fixture");

    assert_eq!(project.color_depth(), ColorDepth::Bpc16);
    assert_eq!(project.expression_engine(), "javascript-1.0");
    assert_eq!(project.len(), 1);

    let item = project.item(1).expect("item 1");
    assert!(matches!(item.kind, ItemKind::Composition(_)));
    let comp = item.as_composition().expect("composition");
    assert_eq!(comp.layers.len(), 2);
    assert_eq!((comp.width, comp.height), (1280, 720));
    assert_eq!(comp.frame_rate, 24.0);
    assert_eq!(comp.duration, 5.0);

    let text_layer = &comp.layers[0];
    assert_eq!(text_layer.index, 1);
    assert_eq!(text_layer.quality, LayerQuality::Best);
    assert!(text_layer.effects_enabled());
    assert!(!comp.layers[1].is_text_layer());
    assert_eq!(text_layer.properties.len(), 1);

    let doc = recover_text(text_layer.text.as_ref().expect("text property"));
    assert_eq!(doc.text, "Hello");
    assert_eq!(doc.source, TextSource::Utf16);
    assert_eq!(doc.font_name, "Arial");
    assert_eq!(doc.font_size, 12.0);
    assert_eq!(doc.font_style, "Regular");
    assert_eq!(doc.fill_color, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(doc.stroke_color, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(doc.justification, Justification::Left);
}

#[test]
fn truncated_by_three_bytes() {
    let data = hello_project();
    let cut = &data[..data.len() - 3];
    match decode(cut) {
        Err(DecodeError::Truncated {
            tag,
            offset,
            declared,
            available,
        }) => {
            assert_eq!(tag, "RIFX");
            assert_eq!(offset, 0);
            assert_eq!(declared as usize, data.len() - 8);
            assert_eq!(available, data.len() - 11);
        },
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn nested_length_past_buffer_end_is_truncated() {
    // The inner chunk claims far more than the file holds while every
    // enclosing length is consistent
    let mut bad = b"tdbs".to_vec();
    bad.extend_from_slice(&0x0010_0000u32.to_be_bytes());
    bad.extend_from_slice(b"abcd");
    let layer = list(
        b"Layr",
        &[list(b"tdgp", &[chunk(b"tdmn", b"ADBE Text Properties\0"), bad])],
    );
    let data = ProjectFixture::new().composition(1, "Main", &[layer]).build();

    assert!(matches!(decode(&data), Err(DecodeError::Truncated { .. })));
}

#[test]
fn nested_overrun_inside_buffer_is_absorbed() {
    // Claims 6 bytes where only 4 belong to the parent; the trailing
    // sibling keeps the bytes inside the buffer
    let mut bad = b"Zzzz".to_vec();
    bad.extend_from_slice(&6u32.to_be_bytes());
    bad.extend_from_slice(b"abcd");
    let layer = list(b"Layr", &[chunk(b"Utf8", b"Solid"), bad]);
    let data = ProjectFixture::new()
        .composition(1, "Main", &[layer, plain_layer("After", 0)])
        .build();

    let project = decode(&data).expect("decode");
    let comp = project.item(1).and_then(|i| i.as_composition()).expect("composition");
    assert_eq!(comp.layers.len(), 2);
    assert_eq!(comp.layers[0].name, "Solid");
    assert!(comp.layers[0].unparsed.iter().all(|p| p.is_opaque()));
    assert_eq!(comp.layers[1].name, "After");
}

#[test]
fn unknown_tags_are_preserved_everywhere() {
    let layer = list(
        b"Layr",
        &[
            chunk(b"Qqqq", b"layer-level"),
            chunk(b"Utf8", b"Caption"),
            list(
                b"tdgp",
                &[
                    chunk(b"Rrrr", b"group header"),
                    chunk(b"tdmn", b"ADBE Opacity\0"),
                    chunk(b"Ssss", &[1, 2, 3]),
                ],
            ),
        ],
    );
    let mut comp = comp_item(3, "Comp", &[layer]);
    // Append an unknown chunk inside the item list and fix up its length
    let extra = chunk(b"Tttt", b"item-level");
    comp.extend_from_slice(&extra);
    let len = (comp.len() - 8) as u32;
    comp[4..8].copy_from_slice(&len.to_be_bytes());

    let data = ProjectFixture::new()
        .body_chunk(chunk(b"Pppp", b"top-level"))
        .item(comp)
        .build();
    let project = decode(&data).expect("decode");

    assert_eq!(project.unparsed().len(), 1);
    assert_eq!(project.unparsed()[0].match_name, "Pppp");
    assert_eq!(
        project.unparsed()[0].raw_bytes(),
        Some(&b"top-level"[..])
    );

    let item = project.item(3).expect("item 3");
    assert!(item.unparsed.iter().any(|p| p.match_name == "Tttt"));

    let layer = &item.as_composition().expect("composition").layers[0];
    assert_eq!(layer.name, "Caption");
    assert!(layer.unparsed.iter().any(|p| p.match_name == "Qqqq"));
    assert!(layer.unparsed.iter().any(|p| p.match_name == "Rrrr"));
    let opacity = &layer.properties[0];
    assert_eq!(opacity.match_name, "ADBE Opacity");
    assert_eq!(opacity.children[0].match_name, "Ssss");
}

#[test]
fn duplicate_item_id_last_write_wins() {
    let data = ProjectFixture::new()
        .composition(7, "first", &[])
        .composition(8, "other", &[])
        .composition(7, "second", &[plain_layer("L", 0)])
        .build();
    let project = decode(&data).expect("decode");

    assert_eq!(project.len(), 2);
    let ids: Vec<_> = project.items().iter().map(|i| i.id).collect();
    assert_eq!(ids, [7, 8]);
    assert_eq!(project.root_items(), &[7, 8]);

    let item = project.item(7).expect("item 7");
    assert_eq!(item.name, "second");
    assert_eq!(item.as_composition().map(|c| c.layers.len()), Some(1));
}

#[test]
fn folders_nest_and_keep_order() {
    let data = ProjectFixture::new()
        .folder(
            10,
            "Scenes",
            &[comp_item(11, "Intro", &[]), folder_item(12, "Sub", &[comp_item(13, "Deep", &[])])],
        )
        .composition(20, "Main", &[])
        .build();
    let project = decode(&data).expect("decode");

    let ids: Vec<_> = project.items().iter().map(|i| i.id).collect();
    assert_eq!(ids, [10, 11, 12, 13, 20]);
    assert_eq!(project.root_items(), &[10, 20]);
    assert_eq!(project.item(10).and_then(|i| i.as_folder()).map(|f| f.children.clone()), Some(vec![11, 12]));
    assert_eq!(project.item(12).and_then(|i| i.as_folder()).map(|f| f.children.clone()), Some(vec![13]));
    assert_eq!(project.compositions().count(), 3);
}

#[test]
fn dangling_sources_are_reported_not_rejected() {
    let data = ProjectFixture::new()
        .composition(1, "Main", &[plain_layer("Orphan", 404), plain_layer("Self", 1)])
        .build();
    let project = decode(&data).expect("decode");

    let dangling = project.dangling_sources();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].source, 404);
    assert_eq!(dangling[0].layer, 1);
}

#[test]
fn extract_all_text_layers_groups_by_composition() {
    let data = ProjectFixture::new()
        .composition(1, "Main", &[text_layer("Greeting", &utf16z("Hello")), plain_layer("BG", 0)])
        .composition(2, "Empty", &[plain_layer("BG", 0)])
        .composition(3, "Lower", &[text_layer("Name title", &[0u8; 4])])
        .build();
    let project = decode(&data).expect("decode");
    assert_eq!(project.text_layers().count(), 2);

    let all = extract_all_text_layers(&project);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].item_id, 1);
    assert_eq!(all[0].documents.len(), 1);
    assert_eq!(all[0].documents[0].document.text, "Hello");
    assert_eq!(all[1].name, "Lower");
    assert_eq!(all[1].documents[0].document.text, "[Name title]");
    assert_eq!(all[1].documents[0].document.source, TextSource::LayerName);
}

#[test]
fn every_prefix_decodes_without_panicking() {
    let data = hello_project();
    for len in 0..data.len() {
        let result = decode(&data[..len]);
        assert!(result.is_err(), "prefix of {} bytes decoded", len);
    }
}

#[test]
fn renamed_layer_data_is_kept_opaque() {
    let mut data = hello_project();
    retag(&mut data, b"ldta", b"Zzzz");
    let project = decode(&data).expect("decode");

    let layer = &main_comp(&project).layers[0];
    assert_eq!(layer.name, "Greeting");
    assert_eq!(layer.flags, LayerFlags::empty());
    assert!(layer.is_text_layer());
    assert_eq!(layer.unparsed.len(), 1);
    assert_eq!(layer.unparsed[0].match_name, "Zzzz");
    let expected = layer_data(2, LayerFlags::EFFECTS, 0);
    assert_eq!(layer.unparsed[0].raw_bytes(), Some(&expected[..]));
}

#[test]
fn renamed_composition_data_is_kept_opaque() {
    let mut data = hello_project();
    retag(&mut data, b"cdta", b"Zzzz");
    let project = decode(&data).expect("decode");

    let item = project.item(1).expect("item 1");
    assert_eq!(item.unparsed.len(), 1);
    assert_eq!(item.unparsed[0].match_name, "Zzzz");
    let expected = comp_data(24, 5, [0, 0, 0], 1280, 720);
    assert_eq!(item.unparsed[0].raw_bytes(), Some(&expected[..]));

    let comp = main_comp(&project);
    assert_eq!((comp.width, comp.height), (0, 0));
    assert_eq!(comp.layers.len(), 2);
}

#[test]
fn renamed_layer_list_is_kept_opaque() {
    let mut data = hello_project();
    let kind = memmem::find(&data, b"Layr").expect("layer list");
    data[kind - 8..kind - 4].copy_from_slice(b"Zzzz");
    let project = decode(&data).expect("decode");

    let item = project.item(1).expect("item 1");
    assert_eq!(item.unparsed.len(), 1);
    assert_eq!(item.unparsed[0].match_name, "Zzzz");
    let original = text_layer("Greeting", &utf16z("Hello"));
    assert_eq!(item.unparsed[0].raw_bytes(), Some(&original[8..]));

    let comp = main_comp(&project);
    assert_eq!(comp.layers.len(), 1);
    assert_eq!(comp.layers[0].name, "Background");
    assert_eq!(comp.layers[0].index, 1);
}

#[test]
fn renamed_match_name_keeps_its_group_under_one_node() {
    let mut data = hello_project();
    retag(&mut data, b"tdmn", b"Zzzz");
    let project = decode(&data).expect("decode");

    // Without its match name the group is no longer recognized as text
    let layer = &main_comp(&project).layers[0];
    assert!(layer.text.is_none());
    assert_eq!(project.text_layers().count(), 0);
    assert_eq!(layer.unparsed.len(), 1);

    let node = &layer.unparsed[0];
    assert_eq!(node.match_name, "Zzzz");
    assert_eq!(node.raw_bytes(), Some(&b"ADBE Text Properties\0"[..]));
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].match_name, "tdgp");
    assert_eq!(layer.properties.len(), 1);
    assert_eq!(layer.properties[0].match_name, "ADBE Transform Group");
}
