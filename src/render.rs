//! HTML rendering
//!
//! Tera templates for the browser-facing customer pages. Built-in templates
//! are embedded; a templates directory may override them by file name.

use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::info;

use crate::error::{AppError, Result};

/// Customer list page.
pub const INDEX: &str = "index.html";
/// Single customer page.
pub const VIEW: &str = "view.html";

mod embedded {
    pub const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Customers</title></head>
<body>
<h1>Customers</h1>
<table>
<tr><th>Name</th><th>Email</th><th>Phone</th><th>Address</th><th></th></tr>
{% for customer in customers %}
<tr>
<td><a href="/customers/{{ customer.id }}">{{ customer.name }}</a></td>
<td>{{ customer.email }}</td>
<td>{{ customer.phone }}</td>
<td>{{ customer.address }}</td>
<td><form method="post" action="/customers/delete/{{ customer.id }}"><button>Delete</button></form></td>
</tr>
{% endfor %}
</table>
<h2>Add customer</h2>
<form method="post" action="/customers/add">
<input name="name" placeholder="Name">
<input name="email" placeholder="Email">
<input name="phone" placeholder="Phone">
<input name="address" placeholder="Address">
<button>Add</button>
</form>
</body>
</html>
"#;

    pub const VIEW: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{{ customer.name }}</title></head>
<body>
<h1>{{ customer.name }}</h1>
<form method="post" action="/customers/update/{{ customer.id }}">
<input name="name" value="{{ customer.name }}">
<input name="email" value="{{ customer.email }}">
<input name="phone" value="{{ customer.phone }}">
<input name="address" value="{{ customer.address }}">
<button>Save</button>
</form>
<a href="/customers">Back</a>
</body>
</html>
"#;
}

// == Templates ==
pub struct Templates {
    tera: Tera,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("names", &self.tera.get_template_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Templates {
    /// Loads the embedded templates, replacing any that exist as files in
    /// `dir`.
    pub fn new(dir: Option<&Path>) -> std::result::Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        for (name, source) in [(INDEX, embedded::INDEX), (VIEW, embedded::VIEW)] {
            match dir.map(|d| d.join(name)).filter(|p| p.is_file()) {
                Some(path) => {
                    tera.add_template_file(&path, Some(name))?;
                    info!(template = name, path = %path.display(), "Loaded template override");
                }
                None => tera.add_raw_template(name, source)?,
            }
        }

        Ok(Self { tera })
    }

    /// Renders `name` with `value` bound under `key`.
    pub fn render<T: Serialize>(&self, name: &str, key: &str, value: &T) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert(key, value);
        self.tera
            .render(name, &ctx)
            .map_err(|e| AppError::internal("Template rendering failed", e))
    }
}
