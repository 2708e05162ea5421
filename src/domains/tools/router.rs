//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only collects
//! them. The set of routes must match `ToolRegistry::get_all_tools()`.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    MemuCategoriesTool, MemuDeleteTool, MemuMemorizeStatusTool, MemuMemorizeTool,
    MemuRetrieveTool,
};
use crate::domains::memu::MemuClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<MemuClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(MemuMemorizeTool::create_route(client.clone()))
        .with_route(MemuMemorizeStatusTool::create_route(client.clone()))
        .with_route(MemuRetrieveTool::create_route(client.clone()))
        .with_route(MemuCategoriesTool::create_route(client.clone()))
        .with_route(MemuDeleteTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::memu::testing::mock_client;

    struct TestServer {}

    fn test_client() -> Arc<MemuClient> {
        Arc::new(mock_client("http://127.0.0.1:1"))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 5);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"memu_memorize"));
        assert!(names.contains(&"memu_memorize_status"));
        assert!(names.contains(&"memu_retrieve"));
        assert!(names.contains(&"memu_categories"));
        assert!(names.contains(&"memu_delete"));
    }

    #[test]
    fn test_registry_matches_router() {
        let client = test_client();
        let registry = ToolRegistry::new(client.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(client);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
