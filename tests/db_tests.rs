mod common;

#[cfg(test)]
pub mod db_tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::common::*;

    use solarpress::common::*;
    use solarpress::db::*;
    use solarpress::models::*;

    #[test]
    fn test_query_params_postgrest_form() {
        let query = Query::table("projects")
            .select("*")
            .eq("featured", true)
            .order("order_index", Order::Ascending)
            .limit(5);

        assert_eq!(query.table_name(), "projects");
        assert!(query.has_filters());
        assert_eq!(
            query.params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("featured".to_string(), "eq.true".to_string()),
                ("order".to_string(), "order_index.asc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_without_filters() {
        let query = Query::table("site_content").order("section", Order::Descending);

        assert!(!query.has_filters());
        assert_eq!(
            query.params(),
            vec![("order".to_string(), "section.desc".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_projects_ordered_with_public_key() {
        let server = MockServer::start().await;
        let projects = seed_projects();

        Mock::given(method("GET"))
            .and(path("/rest/v1/projects"))
            .and(query_param("select", "*"))
            .and(query_param("order", "order_index.asc"))
            .and(query_param_is_missing("status"))
            .and(header("apikey", ANON_KEY))
            .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json_of(&projects)))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let fetched = list_projects(&backend, None).await.unwrap();

        assert_eq!(fetched, projects);
    }

    #[tokio::test]
    async fn test_list_projects_uses_access_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/projects"))
            .and(header("apikey", ANON_KEY))
            .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let fetched = list_projects(&backend, Some(ACCESS_TOKEN)).await.unwrap();

        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn test_list_featured_projects_query() {
        let server = MockServer::start().await;
        let featured = vec![get_seed_project_0(), get_seed_project_2()];

        Mock::given(method("GET"))
            .and(path("/rest/v1/projects"))
            .and(query_param("featured", "eq.true"))
            .and(query_param("order", "order_index.asc"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json_of(&featured)))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let fetched = list_featured_projects(&backend, FEATURED_LIMIT).await.unwrap();

        assert_eq!(fetched, featured);
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/projects"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "JWT expired",
                "code": "PGRST301",
                "hint": null,
                "details": null
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = list_projects(&backend, Some(ACCESS_TOKEN)).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        match err {
            BackendError::Api { status, message, code } => {
                assert_eq!(status, 401);
                assert_eq!(message, "JWT expired");
                assert_eq!(code.as_deref(), Some("PGRST301"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = list_projects(&backend, None).await.unwrap_err();

        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_null_columns_do_not_drop_the_list() {
        let server = MockServer::start().await;
        let good = get_seed_project_1();

        Mock::given(method("GET"))
            .and(path("/rest/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": uuid(0x20).to_string(),
                    "title": "Ongole Microgrid",
                    "description": null,
                    "location": null,
                    "capacity": null,
                    "image_url": null,
                    "status": null,
                    "completion_date": null,
                    "featured": null,
                    "order_index": null,
                    "created_at": "2026-01-04T22:15:06+00:00",
                    "updated_at": "2026-01-04T22:15:06+00:00"
                },
                json_of(&good)
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let fetched = list_projects(&backend, None).await.unwrap();

        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].title, "Ongole Microgrid");
        assert_eq!(fetched[0].image_url, "");
        assert_eq!(fetched[0].description, "");
        assert!(!fetched[0].featured);
        assert_eq!(fetched[0].order_index, 0);
        assert_eq!(fetched[0].status, ProjectStatus::Unknown(String::new()));
        assert_eq!(fetched[1], good);
    }

    #[tokio::test]
    async fn test_null_content_columns_decode() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/site_content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": uuid(0x11).to_string(),
                "section": "hero",
                "title": null,
                "content": null,
                "image_url": null,
                "data": null,
                "updated_at": "2026-01-04T22:15:06Z"
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/project_tab_content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "tab": "Planned",
                "image_url": null,
                "title": "Coming soon",
                "description": null
            }])))
            .mount(&server)
            .await;

        let backend = backend_for(&server);

        let blocks = list_site_content(&backend).await.unwrap();
        assert_eq!(blocks[0].title, "");
        assert_eq!(blocks[0].content, "");
        assert_eq!(blocks[0].data, json!({}));

        let tabs = list_tab_content(&backend).await.unwrap();
        assert_eq!(tabs[0].title, "Coming soon");
        assert_eq!(tabs[0].image_url, "");
        assert_eq!(tabs[0].description, "");
    }

    #[tokio::test]
    async fn test_insert_project_returns_created_row() {
        let server = MockServer::start().await;
        let created = get_seed_project_1();
        let write = ProjectWrite::from(&created);

        Mock::given(method("POST"))
            .and(path("/rest/v1/projects"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!([json_of(&write)])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([json_of(&created)])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let row = insert_project(&backend, &write, Some(ACCESS_TOKEN)).await.unwrap();

        assert_eq!(row, created);
    }

    #[tokio::test]
    async fn test_update_project_filters_by_id() {
        let server = MockServer::start().await;
        let mut project = get_seed_project_0();
        project.title = "Renamed".to_string();
        let write = ProjectWrite::from(&project);

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/projects"))
            .and(query_param("id", format!("eq.{}", project.id).as_str()))
            .and(body_json(json_of(&write)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([json_of(&project)])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let row = update_project(&backend, project.id, &write, Some(ACCESS_TOKEN))
            .await
            .unwrap();

        assert_eq!(row, Some(project));
    }

    #[tokio::test]
    async fn test_update_project_missing_row_is_none() {
        let server = MockServer::start().await;
        let write = ProjectWrite::from(&get_seed_project_0());

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let row = update_project(&backend, uuid(0x99), &write, Some(ACCESS_TOKEN))
            .await
            .unwrap();

        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_delete_project_filters_by_id() {
        let server = MockServer::start().await;
        let id = get_seed_project_2().id;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/projects"))
            .and(query_param("id", format!("eq.{id}").as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        delete_project(&backend, id, Some(ACCESS_TOKEN)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unfiltered_writes_are_refused() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let everything = Query::table("projects");

        let err = backend.delete(&everything, Some(ACCESS_TOKEN)).await.unwrap_err();
        assert!(matches!(err, BackendError::Unfiltered("delete")));

        let err = backend
            .update::<Project, _>(&everything, &json!({ "featured": false }), Some(ACCESS_TOKEN))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Unfiltered("update")));
    }

    #[tokio::test]
    async fn test_list_site_content_unordered_and_by_section() {
        let server = MockServer::start().await;
        let blocks = vec![get_seed_content("hero", 0), get_seed_content("about", 1)];

        Mock::given(method("GET"))
            .and(path("/rest/v1/site_content"))
            .and(query_param("order", "section.asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json_of(&blocks)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/site_content"))
            .and(query_param_is_missing("order"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json_of(&blocks)))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);

        assert_eq!(list_site_content(&backend).await.unwrap(), blocks);
        assert_eq!(
            list_site_content_by_section(&backend, Some(ACCESS_TOKEN)).await.unwrap(),
            blocks
        );
    }

    #[tokio::test]
    async fn test_site_content_missing_data_defaults_to_object() {
        let server = MockServer::start().await;
        let id = uuid(0x10);

        Mock::given(method("GET"))
            .and(path("/rest/v1/site_content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": id.to_string(),
                "section": "hero",
                "title": "Hello",
                "content": "World",
                "image_url": null,
                "updated_at": "2026-01-04T22:15:06Z"
            }])))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let blocks = list_site_content(&backend).await.unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data, json!({}));
        assert!(blocks[0].image_url.is_none());
    }

    #[tokio::test]
    async fn test_update_site_content_sends_editable_subset() {
        let server = MockServer::start().await;
        let block = get_seed_content("about", 1);
        let update = SiteContentUpdate {
            title: "About us".to_string(),
            content: "New copy".to_string(),
            image_url: Some("https://img.test/about.jpg".to_string()),
            data: json!({ "years": 40 }),
        };

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/site_content"))
            .and(query_param("id", format!("eq.{}", block.id).as_str()))
            .and(body_json(json!({
                "title": "About us",
                "content": "New copy",
                "image_url": "https://img.test/about.jpg",
                "data": { "years": 40 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([json_of(&block)])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let row = update_site_content(&backend, block.id, &update, Some(ACCESS_TOKEN))
            .await
            .unwrap();

        assert_eq!(row, Some(block));
    }

    #[tokio::test]
    async fn test_list_tab_content_selects_columns() {
        let server = MockServer::start().await;
        let tabs = vec![get_seed_tab("Operational"), get_seed_tab("Completed")];

        Mock::given(method("GET"))
            .and(path("/rest/v1/project_tab_content"))
            .and(query_param("select", "tab,image_url,title,description"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json_of(&tabs)))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);

        assert_eq!(list_tab_content(&backend).await.unwrap(), tabs);
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/proxy/rest/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let url = url::Url::parse(&format!("{}/proxy", server.uri())).unwrap();
        let backend = Backend::with_client(reqwest::Client::new(), &url, ANON_KEY).unwrap();

        assert!(list_projects(&backend, None).await.unwrap().is_empty());
    }
}
