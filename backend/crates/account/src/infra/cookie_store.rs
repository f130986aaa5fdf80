//! Cookie Jar Session Store
//!
//! [`SessionStore`] over the request's `axum_extra` cookie jar. The handler
//! owns the store for one request and hands the jar back with the response,
//! which is what makes the writes reach the browser.

use axum_extra::extract::cookie::CookieJar;
use platform::cookie::CookieOptions;

use crate::domain::repository::SessionStore;

#[derive(Debug, Clone)]
pub struct CookieJarStore {
    jar: CookieJar,
}

impl CookieJarStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// Jar to return with the response
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionStore for CookieJarStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_string())
    }

    fn set(&mut self, name: &str, value: &str, options: &CookieOptions) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = jar.add(options.build(name, value));
    }

    fn remove(&mut self, name: &str, options: &CookieOptions) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = jar.remove(options.build_removal(name));
    }
}
