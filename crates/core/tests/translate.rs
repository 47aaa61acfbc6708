//! End-to-end translation tests: default policy, ordering, forward
//! compatibility, symbology normalization, field references, and
//! all-or-nothing failure on malformed markup.

mod common;

use common::{diag_codes, label, single, statements, translation, zpl};
use zpl_markup_core::compile::{barcode, text};
use zpl_markup_core::{
    AttrDefault, Attributes, Element, ElementCompiler, TranslateError, TranslateOptions,
    Translator, codes, translate,
};

// ─── Worked example ─────────────────────────────────────────────────────────

#[test]
fn hello_label() {
    let out = translate(r#"<LABEL><TEXT originX="10" originY="20" name="1">Hello</TEXT></LABEL>"#)
        .unwrap();
    assert_eq!(out, "^XA\n^FO10,20^AA,N,1,1^FDHello^FS\n^XZ");
}

#[test]
fn empty_document() {
    assert_eq!(zpl("<LABEL></LABEL>"), "^XA\n^XZ");
    assert_eq!(zpl("<LABEL/>"), "^XA\n^XZ");
}

// ─── Defaults, one attribute at a time ──────────────────────────────────────

/// Build an element with every attribute of `table` set to a sentinel except
/// `omit`, and return the attributes the compiler saw.
fn with_all_but(tag: &str, table: &[AttrDefault], omit: &AttrDefault) -> String {
    let attrs: String = table
        .iter()
        .filter(|a| a.name != omit.name)
        .map(|a| format!(r#" {}="v{}""#, a.name, a.name.len()))
        .collect();
    single(&format!("<{tag}{attrs}/>"))
}

#[test]
fn text_defaults_per_attribute() {
    // x, y, font, rotation, h, w, name
    let cases = [
        (&text::FONT, "^FOv7,v7^AA,v8,v19,v18^FD^FNv4^FS"),
        (&text::HEIGHT, "^FOv7,v7^Av4,v8,1,v18^FD^FNv4^FS"),
        (&text::WIDTH, "^FOv7,v7^Av4,v8,v19,1^FD^FNv4^FS"),
    ];
    for (omit, expected) in cases {
        assert_eq!(with_all_but("TEXT", text::DEFAULTS, omit), expected, "{}", omit.name);
    }
}

#[test]
fn text_defaults_shared_attributes() {
    assert_eq!(single(r#"<TEXT originY="5"/>"#), "^FO0,5^AA,N,1,1^FD^FN0^FS");
    assert_eq!(single(r#"<TEXT originX="5"/>"#), "^FO5,0^AA,N,1,1^FD^FN0^FS");
    assert_eq!(single(r#"<TEXT rotation="R"/>"#), "^FO0,0^AA,R,1,1^FD^FN0^FS");
    assert_eq!(single(r#"<TEXT name="9"/>"#), "^FO0,0^AA,N,1,1^FD^FN9^FS");
}

#[test]
fn barcode_defaults_per_attribute() {
    let full = r#"originX="1" originY="2" barcodetype="BC-CODE128" barcodewidth="3" barcoderatio="4" heightmagnification="5" addcheckdigit="Y" rotation="R" name="6""#;
    assert_eq!(
        single(&format!("<BARCODE {full}/>")),
        "^FO1,2^BY3,4^BCODE128R,5,Y^FN6^FS"
    );

    let drop = |name: &str| {
        let attrs: Vec<&str> = full
            .split(' ')
            .filter(|kv| !kv.starts_with(&format!("{name}=")))
            .collect();
        single(&format!("<BARCODE {}/>", attrs.join(" ")))
    };
    assert_eq!(drop("originX"), "^FO0,2^BY3,4^BCODE128R,5,Y^FN6^FS");
    assert_eq!(drop("originY"), "^FO1,0^BY3,4^BCODE128R,5,Y^FN6^FS");
    assert_eq!(drop("barcodetype"), "^FO1,2^BY3,4^BCODE39R,5,Y^FN6^FS");
    assert_eq!(drop("barcodewidth"), "^FO1,2^BY1,4^BCODE128R,5,Y^FN6^FS");
    assert_eq!(drop("barcoderatio"), "^FO1,2^BY3,1^BCODE128R,5,Y^FN6^FS");
    assert_eq!(drop("heightmagnification"), "^FO1,2^BY3,4^BCODE128R,50,Y^FN6^FS");
    assert_eq!(drop("addcheckdigit"), "^FO1,2^BY3,4^BCODE128R,5,N^FN6^FS");
    assert_eq!(drop("rotation"), "^FO1,2^BY3,4^BCODE128N,5,Y^FN6^FS");
    assert_eq!(drop("name"), "^FO1,2^BY3,4^BCODE128R,5,Y^FN0^FS");
}

#[test]
fn default_tables_are_documented_values() {
    let lookup = |table: &[AttrDefault], name: &str| {
        table.iter().find(|a| a.name == name).map(|a| a.default)
    };
    assert_eq!(lookup(text::DEFAULTS, "heightmagnification"), Some("1"));
    assert_eq!(lookup(barcode::DEFAULTS, "heightmagnification"), Some("50"));
    assert_eq!(lookup(barcode::DEFAULTS, "barcodetype"), Some("BC-CODE39"));
    assert_eq!(lookup(text::DEFAULTS, "barcodetype"), None);
}

// ─── Ordering ───────────────────────────────────────────────────────────────

#[test]
fn order_is_preserved_across_kinds() {
    let children = [
        r#"<BARCODE name="1"/>"#,
        r#"<TEXT>a</TEXT>"#,
        r#"<TEXT>b</TEXT>"#,
        r#"<BARCODE name="2"/>"#,
        r#"<TEXT originX="0" originY="0">c</TEXT>"#,
    ];
    let out = zpl(&label(&children.concat()));
    let expected: Vec<String> = children.iter().map(|c| single(c)).collect();
    assert_eq!(statements(&out), expected);
}

// ─── Unknown tags ───────────────────────────────────────────────────────────

#[test]
fn unknown_tag_is_transparent() {
    let with = label(r#"<TEXT>a</TEXT><LOGO src="x.png"><X/></LOGO><TEXT>b</TEXT>"#);
    let without = label(r#"<TEXT>a</TEXT><TEXT>b</TEXT>"#);
    assert_eq!(zpl(&with), zpl(&without));
}

#[test]
fn lowercase_tags_are_unknown() {
    let t = translation(&label("<text>a</text>"));
    assert_eq!(t.zpl, "^XA\n^XZ");
    assert_eq!(diag_codes(&t.diagnostics), [codes::UNRECOGNIZED_ELEMENT]);
}

#[test]
fn comments_and_text_between_elements_are_ignored() {
    let out = zpl(&label("\n  <!-- note -->\n  stray\n  <TEXT>a</TEXT>\n"));
    assert_eq!(out, "^XA\n^FO0,0^AA,N,1,1^FDa^FS\n^XZ");
}

#[test]
fn comments_inside_a_body_do_not_hide_its_text() {
    let out = zpl(&label("<TEXT><!-- c -->Hello</TEXT><TEXT>He<!-- c -->llo</TEXT>"));
    assert_eq!(
        out,
        "^XA\n^FO0,0^AA,N,1,1^FDHello^FS\n^FO0,0^AA,N,1,1^FDHello^FS\n^XZ"
    );
}

#[test]
fn doctype_is_well_formed() {
    let out = translate("<!DOCTYPE L><L><TEXT>Hi</TEXT></L>").unwrap();
    assert_eq!(out, "^XA\n^FO0,0^AA,N,1,1^FDHi^FS\n^XZ");
}

// ─── Barcode normalization ──────────────────────────────────────────────────

#[test]
fn barcode_prefix_normalization() {
    let prefixed = single(r#"<BARCODE barcodetype="BC-CODE128"/>"#);
    let bare = single(r#"<BARCODE barcodetype="CODE128"/>"#);
    assert!(prefixed.contains("^BCODE128N,50,N"), "{prefixed}");
    assert_eq!(prefixed, bare);

    let doubled = single(r#"<BARCODE barcodetype="BC-BC-EAN13"/>"#);
    assert!(doubled.contains("^BEAN13N,50,N"), "{doubled}");
}

// ─── Field references ───────────────────────────────────────────────────────

#[test]
fn text_field_reference_and_literal_body() {
    assert!(single(r#"<TEXT name="5"/>"#).contains("^FD^FN5^FS"));
    assert!(single(r#"<TEXT name="5"></TEXT>"#).contains("^FD^FN5^FS"));
    let literal = single(r#"<TEXT name="5">Serial &lt;A&gt;</TEXT>"#);
    assert!(literal.contains("^FDSerial <A>^FS"), "{literal}");
    assert!(!literal.contains("^FN"));
}

// ─── Malformed input ────────────────────────────────────────────────────────

#[test]
fn malformed_markup_is_all_or_nothing() {
    for bad in [
        "<LABEL><TEXT>",
        "<LABEL><TEXT></LABEL>",
        "<LABEL></LABEL><LABEL></LABEL>",
        "<LABEL><TEXT originX=10/></LABEL>",
        "",
    ] {
        match Translator::default().translate(bad) {
            Err(TranslateError::Malformed(e)) => {
                assert!(e.span.start <= bad.len(), "{bad:?}: {e:?}");
                assert_eq!(e.to_diagnostic().id, codes::MALFORMED_MARKUP);
            }
            other => panic!("expected Malformed for {bad:?}, got {other:?}"),
        }
    }
}

// ─── Extension & strictness ─────────────────────────────────────────────────

struct GraphicBox;

impl ElementCompiler for GraphicBox {
    fn tag(&self) -> &str {
        "BOX"
    }

    fn defaults(&self) -> &'static [AttrDefault] {
        const DEFAULTS: &[AttrDefault] = &[AttrDefault::new("thickness", "1")];
        DEFAULTS
    }

    fn compile(&self, element: &Element) -> String {
        let t = Attributes::of(element).get(&self.defaults()[0]);
        format!("^GB10,10,{t}^FS")
    }
}

#[test]
fn registered_compiler_joins_the_pipeline() {
    let translator = Translator::default().with_compiler(Box::new(GraphicBox));
    let t = translator
        .translate(&label(r#"<TEXT>a</TEXT><BOX thickness="3"/>"#))
        .unwrap();
    assert_eq!(t.zpl, "^XA\n^FO0,0^AA,N,1,1^FDa^FS\n^GB10,10,3^FS\n^XZ");
    assert!(t.diagnostics.is_empty());
}

#[test]
fn strict_mode_reports_attribute_warnings() {
    let t = Translator::new(TranslateOptions::strict())
        .translate(&label(r#"<BARCODE rotation="Z" size="9"/>"#))
        .unwrap();
    assert_eq!(
        diag_codes(&t.diagnostics),
        [codes::UNKNOWN_ATTRIBUTE, codes::INVALID_ROTATION]
    );
}

#[test]
fn concurrent_translations_are_independent() {
    let translator = std::sync::Arc::new(Translator::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let translator = std::sync::Arc::clone(&translator);
            std::thread::spawn(move || {
                let markup = format!(r#"<L><TEXT originX="{i}">t{i}</TEXT></L>"#);
                translator.translate(&markup).unwrap().zpl
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out, format!("^XA\n^FO{i},0^AA,N,1,1^FDt{i}^FS\n^XZ"));
    }
}
