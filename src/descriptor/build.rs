use super::error::DescriptorError;
use super::types::{Middleware, Route, ServiceDescriptor};
use crate::generator::naming::method_name;
use tracing::debug;

impl ServiceDescriptor {
    /// Appends `route` unless it is malformed, reuses a route handler name,
    /// or shares its path and at least one method with an existing route.
    ///
    /// Handler names are compared by the method they generate, so `GetShip`
    /// and `get_ship` collide.
    /// A route without methods shares no method with anything.
    ///
    /// All checks run before the list is touched, so a rejected route leaves
    /// the descriptor exactly as it was.
    pub fn add_route(&mut self, route: Route) -> Result<(), DescriptorError> {
        validate_route(&route)?;
        let generated = method_name(&route.handler_name);

        for existing in &self.routes {
            if method_name(&existing.handler_name) == generated {
                return Err(DescriptorError::DuplicateHandler(
                    existing.handler_name.clone(),
                ));
            }

            if existing.path != route.path {
                continue;
            }

            if let Some(method) = route
                .http_methods
                .iter()
                .find(|m| existing.accepts(**m))
            {
                return Err(DescriptorError::DuplicateRouteMethod(
                    existing.path.clone(),
                    *method,
                ));
            }
        }

        debug!(
            path = %route.path,
            handler = %route.handler_name,
            methods = ?route.http_methods,
            "route added"
        );
        self.routes.push(route);
        Ok(())
    }

    /// Appends `mw` unless its handler name is malformed or already used by
    /// another middleware, compared the same way as route handlers. Route
    /// handler names do not conflict.
    pub fn add_middleware(&mut self, mw: Middleware) -> Result<(), DescriptorError> {
        validate_handler_name(&mw.handler_name)?;
        let generated = method_name(&mw.handler_name);

        if let Some(existing) = self
            .middlewares
            .iter()
            .find(|m| method_name(&m.handler_name) == generated)
        {
            return Err(DescriptorError::DuplicateHandler(
                existing.handler_name.clone(),
            ));
        }

        debug!(
            handler = %mw.handler_name,
            priority = mw.priority,
            "middleware added"
        );
        self.middlewares.push(mw);
        Ok(())
    }

    /// Middlewares in registration order: highest priority first, equal
    /// priorities in insertion order. The stored list is not reordered.
    pub fn middlewares_by_priority(&self) -> Vec<&Middleware> {
        let mut ordered: Vec<&Middleware> = self.middlewares.iter().collect();
        // sort_by is stable
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered
    }
}

fn validate_route(route: &Route) -> Result<(), DescriptorError> {
    if !route.path.starts_with('/') {
        return Err(DescriptorError::InvalidPath(route.path.clone()));
    }
    for (i, method) in route.http_methods.iter().enumerate() {
        if route.http_methods[..i].contains(method) {
            return Err(DescriptorError::RepeatedMethod(route.path.clone(), *method));
        }
    }
    validate_handler_name(&route.handler_name)
}

/// Handler names must be plain ASCII identifiers; `_` alone is not one.
fn validate_handler_name(name: &str) -> Result<(), DescriptorError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && name != "_"
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DescriptorError::InvalidHandlerName(name.to_string()))
    }
}
