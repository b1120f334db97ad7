use slurpers::{
    ConfigSlurper, Error, Field, Format, JsonSlurper, Node, SlurpOptions, Slurper, XmlSlurper,
};

const XML: &str = "<library>\
    <book><title>Dune</title><year>1965</year></book>\
    <book><title>Solaris</title><year>1961</year></book>\
    <owner>Ann</owner>\
</library>";

const JSON: &str = r#"{
    "book": [
        {"title": "Dune", "year": "1965"},
        {"title": "Solaris", "year": "1961"}
    ],
    "owner": "Ann"
}"#;

#[test]
fn test_xml_and_json_build_the_same_tree() {
    let options = SlurpOptions::default();
    let xml = XmlSlurper::from_str(XML, &options).unwrap();
    let json = JsonSlurper::from_str(JSON, &options).unwrap();
    assert_eq!(xml.root(), json.root());
    assert_eq!(xml.format(), Format::Xml);
    assert_eq!(json.format(), Format::Json);
    assert_eq!(xml.to_string(), json.to_string());
}

#[test]
fn test_navigation_is_format_independent() {
    let options = SlurpOptions::default();
    let docs = [
        XmlSlurper::from_str(XML, &options).unwrap(),
        JsonSlurper::from_str(JSON, &options).unwrap(),
    ];
    for doc in &docs {
        let titles: Vec<String> = doc
            .get("book")
            .unwrap()
            .iter()
            .unwrap()
            .map(|book| book.get("title").unwrap().to_string())
            .collect();
        assert_eq!(titles, ["Dune", "Solaris"]);
        assert_eq!(doc.get("owner").unwrap().at(0).unwrap(), "Ann");
    }
}

#[test]
fn test_field_kinds() {
    let doc = XmlSlurper::from_str(XML, &SlurpOptions::default()).unwrap();

    let owner = doc.get("owner").unwrap();
    assert!(owner.is_scalar());
    assert!(matches!(owner, Field::Scalar(_)));

    let books = doc.get("book").unwrap();
    assert_eq!(books.kind(), "sequence");
    let first = books.at(0).unwrap();
    assert_eq!(first.kind(), "mapping");
    assert_eq!(first.as_view().unwrap().node().as_mapping().unwrap().len(), 2);
}

#[test]
fn test_entries_walk_a_section() {
    let doc = ConfigSlurper::from_str(
        "[paths]\nhome = /home/ann\ncache = /tmp/cache\n",
        &SlurpOptions::default(),
    )
    .unwrap();
    let paths: Vec<(String, String)> = doc
        .get("paths")
        .unwrap()
        .entries()
        .unwrap()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    assert_eq!(
        paths,
        [
            ("home".to_string(), "/home/ann".to_string()),
            ("cache".to_string(), "/tmp/cache".to_string())
        ]
    );
}

#[test]
fn test_errors_name_the_failure() {
    let doc = JsonSlurper::from_str(JSON, &SlurpOptions::default()).unwrap();

    let err = doc.get("missing").unwrap_err();
    assert_eq!(err, Error::missing_key("missing"));

    let err = doc.get("book").unwrap().at(5).unwrap_err();
    assert_eq!(err.to_string(), "Index 5 out of range for sequence of length 2");

    let err = doc.get("owner").unwrap().get("name").unwrap_err();
    assert!(err.is_missing_key());

    let err = doc.get("owner").unwrap().len().unwrap_err();
    assert!(err.is_type_mismatch());

    let err = doc.iter().unwrap_err();
    assert_eq!(err.to_string(), "Cannot iterate a mapping");
}

#[test]
fn test_documents_outlive_their_input() {
    let doc = {
        let text = String::from("<r><k>v</k></r>");
        XmlSlurper::from_str(&text, &SlurpOptions::default()).unwrap()
    };
    assert_eq!(doc.get("k").unwrap(), "v");

    let root: Node = doc.into_root();
    assert!(root.is_mapping());
}

#[test]
fn test_views_serialize_as_json() {
    let doc = XmlSlurper::from_str(XML, &SlurpOptions::default()).unwrap();
    let value = serde_json::to_value(doc.root()).unwrap();
    assert_eq!(value["book"][1]["title"], "Solaris");
    assert_eq!(value["owner"], "Ann");
}
