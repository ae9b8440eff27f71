/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::collections::HashMap;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Supplies request headers for outgoing connection attempts.
///
/// The mapping is materialized fresh on every call and must not be cached by
/// callers: the listener looks headers up again on each `start`, so rotated
/// credentials take effect on the next connection.
pub trait AuthenticationProvider: Send + Sync {
    /// Returns the headers to attach to the next connection request. Empty
    /// when no credentials are configured.
    fn connection_headers(&self) -> HashMap<String, String>;
}

/// Provider for unauthenticated connections; always produces an empty
/// mapping.
#[derive(Clone, Debug, Default)]
pub struct AnonymousAuthentication;

impl AuthenticationProvider for AnonymousAuthentication {
    fn connection_headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// HTTP Basic credentials rendered as an `Authorization` header.
#[derive(Clone)]
pub struct BasicAuthentication {
    username: String,
    password: String,
}

impl BasicAuthentication {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Credentials stay out of debug output.
impl std::fmt::Debug for BasicAuthentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthentication")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AuthenticationProvider for BasicAuthentication {
    fn connection_headers(&self) -> HashMap<String, String> {
        let credentials = BASE64.encode(format!("{}:{}", self.username, self.password));
        HashMap::from([(
            AUTHORIZATION_HEADER.to_string(),
            format!("Basic {credentials}"),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AnonymousAuthentication, AuthenticationProvider, BasicAuthentication, AUTHORIZATION_HEADER,
    };

    #[test]
    fn anonymous_provider_produces_empty_headers() {
        let headers = AnonymousAuthentication.connection_headers();

        assert!(headers.is_empty());
    }

    #[test]
    fn basic_provider_produces_encoded_authorization_header() {
        let provider = BasicAuthentication::new("user", "pass");

        let headers = provider.connection_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get(AUTHORIZATION_HEADER),
            Some(&"Basic dXNlcjpwYXNz".to_string())
        );
    }

    #[test]
    fn basic_provider_materializes_fresh_mapping_per_call() {
        let provider = BasicAuthentication::new("user", "pass");

        let mut first = provider.connection_headers();
        first.insert("X-Extra".to_string(), "mutated".to_string());

        assert_eq!(provider.connection_headers().len(), 1);
    }

    #[test]
    fn basic_provider_debug_output_hides_password() {
        let provider = BasicAuthentication::new("user", "hunter2");

        let rendered = format!("{provider:?}");

        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
