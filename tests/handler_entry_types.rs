mod common;

use serde_json::Value;

#[tokio::test]
async fn test_entry_types_lists_builtin_kinds() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/entry-types").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["html", "link", "text"]);
}

#[tokio::test]
async fn test_entry_types_expose_admin_forms() {
    let (server, _repo) = common::create_test_server();

    let json = server.get("/api/entry-types").await.json::<Value>();
    let link = &json["items"][1];
    let fields = link["form"]["fields"].as_array().unwrap();

    let field = |name: &str| {
        fields
            .iter()
            .find(|f| f["name"] == name)
            .cloned()
            .unwrap_or(Value::Null)
    };

    assert_eq!(field("title")["kind"], "char");
    assert_eq!(field("title")["required"], true);
    assert_eq!(field("tags")["required"], false);
    assert_eq!(field("published")["kind"], "boolean");
    assert_eq!(field("link_url")["required"], true);
    assert_eq!(field("description")["required"], false);
}
