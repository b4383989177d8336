#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("DashboardFilterRequest"));
        assert!(components.schemas.contains_key("DashboardUpdate"));
        assert!(components.schemas.contains_key("DashboardLayout"));

        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = error_response_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_health_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let health_response_schema = components.schemas.get("HealthResponse").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = health_response_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("status"));
            assert!(properties.contains_key("version"));
            assert!(properties.contains_key("records"));
        } else {
            panic!("HealthResponse should be an object schema");
        }
    }

    #[test]
    fn test_filter_request_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let request_schema = components.schemas.get("DashboardFilterRequest").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = request_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("suppliers"));
            assert!(properties.contains_key("materials"));
            assert!(properties.contains_key("search_text"));
            // Every field may be omitted
            assert!(obj.required.is_empty());
        } else {
            panic!("DashboardFilterRequest should be an object schema");
        }
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.paths.paths.contains_key("/health"));

        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path.operations.get(&utoipa::openapi::PathItemType::Get);
        assert!(health_get.is_some());

        let responses = &health_get.unwrap().responses;
        assert!(responses.responses.contains_key("200"));
    }

    #[test]
    fn test_openapi_paths_contain_dashboard_endpoints() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let dashboard = paths.get("/api/v1/dashboard").unwrap();
        let post = dashboard
            .operations
            .get(&utoipa::openapi::PathItemType::Post)
            .unwrap();
        assert!(post.request_body.is_some());
        assert!(post.responses.responses.contains_key("200"));
        assert!(post.responses.responses.contains_key("400"));

        for path in ["/api/v1/layout", "/api/v1/filter-options"] {
            let item = paths.get(path).unwrap();
            assert!(item.operations.contains_key(&utoipa::openapi::PathItemType::Get));
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi = ApiDoc::openapi();
        let openapi_json = serde_json::to_string(&openapi).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
