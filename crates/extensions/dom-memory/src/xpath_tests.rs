use super::*;
use crate::fixture::PageFixture;
use pinpoint_protocols::Document;

fn list_page() -> MemoryDocument {
    let fixture = PageFixture::new("body")
        .with_child(PageFixture::new("div").with_text("first"))
        .with_child(
            PageFixture::new("ul")
                .with_attr("id", "list")
                .with_child(PageFixture::new("li").with_text("a"))
                .with_child(PageFixture::new("li").with_text("b"))
                .with_child(PageFixture::new("li").with_text("c")),
        )
        .with_child(PageFixture::new("div").with_attr("id", "dup"))
        .with_child(PageFixture::new("span").with_attr("id", "dup"));
    MemoryDocument::from_fixture(&fixture).unwrap()
}

#[test]
fn test_parse_id_anchor() {
    let locator = parse(r#"//*[@id="list"]/li[3]"#).unwrap();
    assert_eq!(locator.anchor, Anchor::Id("list".to_string()));
    assert_eq!(
        locator.steps,
        vec![Step {
            tag: "li".to_string(),
            index: Some(3)
        }]
    );
}

#[test]
fn test_parse_rejects_unsupported() {
    for xpath in ["", "div", "//div", "/html/li[0]", "/html/li[x]", "/html//p", "/"] {
        assert!(parse(xpath).is_err(), "{xpath} should not parse");
    }
}

#[test]
fn test_locate_body() {
    let doc = list_page();
    assert_eq!(doc.locate("/html/body").unwrap(), doc.body().unwrap());
}

#[test]
fn test_locate_positional() {
    let doc = list_page();
    let div = doc.locate("/html/body/div[1]").unwrap();
    assert_eq!(doc.text_content(&div).as_deref(), Some("first"));

    let second = doc.locate("/html/body/div[2]").unwrap();
    assert_eq!(doc.id(&second).as_deref(), Some("dup"));
}

#[test]
fn test_locate_by_id_with_steps() {
    let doc = list_page();
    let li = doc.locate(r#"//*[@id="list"]/li[3]"#).unwrap();
    assert_eq!(doc.text_content(&li).as_deref(), Some("c"));

    let err = doc.locate(r#"//*[@id="list"]/li[4]"#).unwrap_err();
    assert!(matches!(err, LookupError::NotFound(_)));
}

#[test]
fn test_locate_ambiguous() {
    let doc = list_page();
    let err = doc.locate(r#"//*[@id="dup"]"#).unwrap_err();
    assert_eq!(
        err,
        LookupError::Ambiguous {
            locator: r#"//*[@id="dup"]"#.to_string(),
            count: 2
        }
    );

    let err = doc.locate(r#"//*[@id="list"]/li"#).unwrap_err();
    assert!(matches!(err, LookupError::Ambiguous { count: 3, .. }));
}

#[test]
fn test_find_element_prefers_xpath() {
    let doc = list_page();
    let capture = CapturedElement {
        tag_name: "LI".to_string(),
        xpath: Some(r#"//*[@id="list"]/li[2]"#.to_string()),
        ..Default::default()
    };
    let li = doc.find_element(&capture).unwrap();
    assert_eq!(doc.text_content(&li).as_deref(), Some("b"));
}

#[test]
fn test_find_element_falls_back_to_id() {
    let doc = list_page();
    let capture = CapturedElement {
        tag_name: "UL".to_string(),
        id: "list".to_string(),
        xpath: Some("/html/body/ul[4]".to_string()),
        ..Default::default()
    };
    let node = doc.find_element(&capture).unwrap();
    assert_eq!(doc.tag_name(&node).as_deref(), Some("UL"));
}

#[test]
fn test_find_element_rejects_duplicate_id() {
    let doc = list_page();
    let capture = CapturedElement {
        tag_name: "DIV".to_string(),
        id: "dup".to_string(),
        xpath: Some("/html/body/div[5]".to_string()),
        ..Default::default()
    };
    assert_eq!(
        doc.find_element(&capture),
        Err(LookupError::Ambiguous {
            locator: r#"//*[@id="dup"]"#.to_string(),
            count: 2,
        })
    );
}

#[test]
fn test_find_element_unresolvable() {
    let doc = list_page();
    let capture = CapturedElement {
        tag_name: "P".to_string(),
        xpath: Some("/html/body/p[9]".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        doc.find_element(&capture),
        Err(LookupError::Unresolvable(_))
    ));
}
