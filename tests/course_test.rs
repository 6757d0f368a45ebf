//! Tests for loading generated courses and rendering their topics.

use classmark::{CourseData, CourseRequest, Error, RenderConfig};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn load_course() -> CourseData {
    let json = std::fs::read_to_string(format!("{FIXTURES_DIR}/course.json"))
        .expect("Failed to read course fixture");
    CourseData::from_json(&json).expect("Failed to parse course")
}

#[test]
fn test_toc_order() {
    let course = load_course();
    let ids: Vec<&str> = course.toc.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["intro", "loops"]);
    assert_eq!(course.first_topic().map(|t| t.title.as_str()), Some("Introduction to Python"));
}

#[test]
fn test_render_intro_topic() {
    let course = load_course();
    let rendered = course
        .render_topic("intro", &RenderConfig::default())
        .expect("Failed to render topic");

    let expected = "<h2>Introduction to Python</h2>\n\
        <p>Python is a <em>general purpose</em> language.<br>It reads like <strong>plain English</strong>.</p>\n\
        <h4 id=\"subtopic-1.1\">1.1 Installing</h4>\n\
        <li>• Download from <code>python.org</code></li>\n\
        <li>• Run the installer</li>\n\
        <h4 id=\"subtopic-1.2\">1.2 Hello World</h4>\n\
        <pre><code class=\"language-python\">print(\"Hello, World!\")</code></pre>";
    assert_eq!(rendered.html, expected);
}

#[test]
fn test_code_sample_keeps_asterisks() {
    let course = load_course();
    let rendered = course.render_topic("loops", &RenderConfig::default()).unwrap();
    assert!(rendered.html.contains("print(i * 2)"));
    assert!(rendered.html.contains("<li>• Runs <strong>while</strong> a condition holds</li>"));
}

#[test]
fn test_service_headlines_match_rendered_anchors() {
    let course = load_course();
    let config = RenderConfig::default();
    let rendered = course.render_topic("intro", &config).unwrap();

    for headline in course.headlines_for("intro", &config) {
        assert!(
            rendered.html.contains(&format!("id=\"{}\"", headline.id)),
            "missing anchor {}",
            headline.id
        );
    }
}

#[test]
fn test_derived_headlines() {
    let course = load_course();
    let headlines = course.headlines_for("loops", &RenderConfig::default());
    let titles: Vec<&str> = headlines.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, ["2.1 The for loop", "2.2 The while loop"]);
    assert_eq!(headlines[1].id, "subtopic-2.2");
}

#[test]
fn test_unknown_topic() {
    let course = load_course();
    let err = course
        .render_topic("recursion", &RenderConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownTopic(ref id) if id == "recursion"));
    assert!(course.headlines_for("recursion", &RenderConfig::default()).is_empty());
}

#[test]
fn test_course_request() {
    let request = CourseRequest::new("  Organic Chemistry ").unwrap();
    assert_eq!(request.to_json().unwrap(), r#"{"subject":"Organic Chemistry"}"#);
    assert!(matches!(CourseRequest::new(" \n"), Err(Error::EmptySubject)));
}
