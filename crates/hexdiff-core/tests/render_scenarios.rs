use hexdiff_core::{
    ChangeKind, Diff, EditOp, Encoding, Highlight, Model, RenderConfig, Renderer,
};

fn html() -> Renderer {
    Renderer::new(RenderConfig {
        style: Highlight::Html,
        ..RenderConfig::default()
    })
}

fn two_objects(source: &[u8], target: &[u8], ops: Vec<EditOp>) -> Model {
    Model::new(vec![source.into(), target.into()], vec![Diff::new(1, ops)])
}

#[test]
fn single_replaced_byte_in_one_row() {
    let model = two_objects(
        b"ABCDEFGHIJKLMNOP",
        b"ABCDEXGHIJKLMNOP",
        vec![
            EditOp::equal(0..5, 0..5),
            EditOp::replace(5..6, 5..6),
            EditOp::equal(6..16, 6..16),
        ],
    );

    let out = html().render(&model, &model.diffs[0]).unwrap();

    assert_eq!(
        out,
        "000000: 41 42 43 44 45 <span class='replace'>58</span> 47 48 49 4a 4b 4c 4d 4e 4f 50 \
         |ABCDE<span class='replace'>X</span>GHIJKLMNOP|"
    );
}

#[test]
fn replace_carries_only_its_own_marker() {
    let model = two_objects(
        b"0123456789abcdef0123",
        b"0123456789ABCDEF0123",
        vec![
            EditOp::equal(0..10, 0..10),
            EditOp::replace(10..16, 10..16),
            EditOp::equal(16..20, 16..20),
        ],
    );

    let out = html().render(&model, &model.diffs[0]).unwrap();

    assert!(out.contains("<span class='replace'>41 42 43 44 45 46</span>"));
    assert!(out.contains("<span class='replace'>ABCDEF</span>"));
    assert!(!out.contains("class='insert'"));
    assert!(!out.contains("class='delete'"));
    assert!(!out.contains("class='equal'"));
}

#[test]
fn pure_insertion_diff_view_shows_one_row() {
    let mut model = Model::default();
    model.push(&b"0123456789"[..]).push(&b"0123XYZ456789"[..]);

    let out = html().diff_render(&model, &model.diffs[0]).unwrap();

    assert_eq!(out.lines().count(), 1);
    assert_eq!(
        out,
        "000000: 30 31 32 33 <span class='insert'>58 59 5a</span> 34 35 36 37 38 39"
    );
}

#[test]
fn pure_deletion_diff_view_marks_the_gap() {
    let mut model = Model::default();
    model.push(&b"0123XYZ456789"[..]).push(&b"0123456789"[..]);

    let out = html().diff_render(&model, &model.diffs[0]).unwrap();

    assert_eq!(
        out,
        "000000: 30 31 32 33<span class='delete'> </span>34 35 36 37 38 39"
    );
}

#[test]
fn self_diff_renders_nothing() {
    let data: Vec<u8> = (0..=255).collect();
    let mut model = Model::default();
    model.push(data.clone()).push(data);

    let out = Renderer::default()
        .diff_render(&model, &model.diffs[0])
        .unwrap();

    assert_eq!(out, "");
}

#[test]
fn insertion_keeps_rows_on_target_offsets() {
    let target: Vec<u8> = (0u8..40).collect();
    let model = two_objects(
        &[],
        &target,
        vec![
            EditOp::equal(0..3, 0..3),
            EditOp::insert(3, 3..8),
            EditOp::equal(3..35, 8..40),
        ],
    );

    let out = html().render(&model, &model.diffs[0]).unwrap();
    let rows: Vec<&str> = out.lines().collect();

    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("000000: 00 01 02 <span class='insert'>03 04 05 06 07</span> 08"));
    assert!(rows[1].starts_with("000010: 10 11 12 13 14 15 16 17 18 19 1a 1b 1c 1d 1e 1f |"));
    assert!(rows[2].starts_with("000020: 20 21 22 23 24 25 26 27 "));
}

#[test]
fn diff_view_skips_rows_but_keeps_addresses() {
    let source: Vec<u8> = vec![0; 64];
    let mut target = source.clone();
    target[50] = 0xaa;
    let mut model = Model::default();
    model.push(source).push(target);

    let out = Renderer::default()
        .diff_render(&model, &model.diffs[0])
        .unwrap();

    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("000030: 00 00 \x1b[33maa\x1b[0m 00"));
}

#[test]
fn hex_and_text_encodings() {
    let mut model = Model::default();
    model.push("hello world").push("hello there world");

    let hex = Renderer::new(RenderConfig {
        encoding: Encoding::Hex,
        style: Highlight::Html,
        width: None,
    })
    .render(&model, &model.diffs[0])
    .unwrap();
    assert!(hex.starts_with("68656c6c6f"));
    assert!(hex.contains("<span class='insert'>"));

    let text = Renderer::new(RenderConfig {
        encoding: Encoding::Text,
        style: Highlight::Html,
        width: None,
    })
    .render(&model, &model.diffs[0])
    .unwrap();
    let plain = text
        .replace("<span class='insert'>", "")
        .replace("</span>", "");
    assert_eq!(plain, "hello there world");
}

#[test]
fn equal_ops_only_render_without_markers() {
    let model = Model::new(vec!["plain".into()], vec![Diff::identity(0, 5)]);
    let out = Renderer::default().render(&model, &model.diffs[0]).unwrap();
    assert!(!out.contains('\x1b'));
    assert!(out.ends_with("|plain           |"));
    assert!(model.diffs[0]
        .opcodes
        .iter()
        .all(|op| op.kind == ChangeKind::Equal));
}
