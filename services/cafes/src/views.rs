//! Server-rendered HTML pages
//!
//! Every interpolated value goes through [`escape`].

use axum::{http::StatusCode, response::Html};
use chrono::{Datelike, Utc};

use crate::{
    forms::{CafeForm, FieldErrors, LoginForm, RegisterForm},
    middleware::{AdminList, Principal},
    models::Cafe,
};

/// What every page needs to know about the viewer
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub logged_in: bool,
    /// 0 when nobody is logged in
    pub current_user_id: i64,
    pub user_name: Option<String>,
    pub owners: Vec<i64>,
}

impl ViewContext {
    pub fn new(principal: &Principal, admins: &AdminList) -> Self {
        Self {
            logged_in: principal.is_authenticated(),
            current_user_id: principal.user().map_or(0, |user| user.id),
            user_name: principal.user().map(|user| user.name.clone()),
            owners: admins.ids().to_vec(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            logged_in: false,
            current_user_id: 0,
            user_name: None,
            owners: Vec::new(),
        }
    }

    fn is_owner(&self) -> bool {
        self.logged_in && self.owners.contains(&self.current_user_id)
    }
}

/// Escape text for use in HTML bodies and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(ctx: &ViewContext, title: &str, body: &str) -> Html<String> {
    let nav = if ctx.logged_in {
        format!(
            r#"<li class="nav-item"><span class="navbar-text me-2">{}</span></li>
           <li class="nav-item"><a class="nav-link" href="/add_cafe">Add Cafe</a></li>
           <li class="nav-item"><a class="nav-link" href="/logout">Log Out</a></li>"#,
            escape(ctx.user_name.as_deref().unwrap_or_default())
        )
    } else {
        r#"<li class="nav-item"><a class="nav-link" href="/login">Login</a></li>
           <li class="nav-item"><a class="nav-link" href="/register">Register</a></li>"#
            .to_string()
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Cafes</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body>
  <nav class="navbar navbar-expand navbar-dark bg-dark mb-4">
    <div class="container">
      <a class="navbar-brand" href="/">Cafes &amp; Wifi</a>
      <ul class="navbar-nav ms-auto">
        <li class="nav-item"><a class="nav-link" href="/">Home</a></li>
        {nav}
      </ul>
    </div>
  </nav>
  <main class="container">
{body}
  </main>
  <footer class="container text-center text-muted py-4">&copy; {year} Cafes &amp; Wifi</footer>
</body>
</html>"#,
        title = escape(title),
        nav = nav,
        body = body,
        year = Utc::now().year(),
    ))
}

fn amenity(label: &str, present: bool) -> String {
    format!(
        r#"<li>{}: {}</li>"#,
        label,
        if present { "&#10004;" } else { "&#10008;" }
    )
}

/// Listing of every cafe
pub fn index(ctx: &ViewContext, cafes: &[Cafe]) -> Html<String> {
    let mut body = String::from(r#"<h1 class="mb-4">Cafes</h1>"#);

    if cafes.is_empty() {
        body.push_str(r#"<p class="lead">No cafes listed yet.</p>"#);
    }

    body.push_str(r#"<div class="row">"#);
    for cafe in cafes {
        let admin_links = if ctx.is_owner() {
            format!(
                r#"<a class="btn btn-sm btn-outline-secondary" href="/edit-post/{id}">Edit</a>
                   <a class="btn btn-sm btn-outline-danger" href="/delete/{id}">Delete</a>"#,
                id = cafe.id
            )
        } else {
            String::new()
        };

        body.push_str(&format!(
            r#"
<div class="col-md-4 mb-4">
  <div class="card h-100">
    <img class="card-img-top" src="{img_url}" alt="{name}">
    <div class="card-body">
      <h5 class="card-title">{name}</h5>
      <p class="card-text">{location}</p>
      <ul class="list-unstyled">
        <li>Seats: {seats}</li>
        <li>Coffee: {coffee_price}</li>
        {toilet}{wifi}{sockets}{calls}
      </ul>
      <a class="btn btn-sm btn-primary" href="{map_url}">Map</a>
      {admin_links}
    </div>
  </div>
</div>"#,
            img_url = escape(&cafe.img_url),
            name = escape(&cafe.name),
            location = escape(&cafe.location),
            seats = escape(&cafe.seats),
            coffee_price = escape(cafe.coffee_price.as_deref().unwrap_or("n/a")),
            toilet = amenity("Toilet", cafe.has_toilet),
            wifi = amenity("Wifi", cafe.has_wifi),
            sockets = amenity("Sockets", cafe.has_sockets),
            calls = amenity("Can take calls", cafe.can_take_calls),
            map_url = escape(&cafe.map_url),
            admin_links = admin_links,
        ));
    }
    body.push_str("</div>");

    layout(ctx, "Home", &body)
}

fn text_input(
    name: &str,
    label: &str,
    kind: &str,
    value: &str,
    errors: &FieldErrors,
) -> String {
    let (class, feedback) = match errors.get(name) {
        Some(message) => (
            "form-control is-invalid",
            format!(r#"<div class="invalid-feedback">{}</div>"#, escape(message)),
        ),
        None => ("form-control", String::new()),
    };

    format!(
        r#"
<div class="mb-3">
  <label class="form-label" for="{name}">{label}</label>
  <input class="{class}" type="{kind}" id="{name}" name="{name}" value="{value}">
  {feedback}
</div>"#,
        name = name,
        label = escape(label),
        class = class,
        kind = kind,
        value = escape(value),
        feedback = feedback,
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<div class="alert alert-danger">{}</div>"#, escape(message)))
        .unwrap_or_default()
}

/// Registration page
pub fn register(ctx: &ViewContext, form: &RegisterForm, errors: &FieldErrors) -> Html<String> {
    let body = format!(
        r#"<h1>Register</h1>
<form method="post" action="/register" novalidate>
{email}{name}{password}
  <button class="btn btn-primary" type="submit">Sign Me Up</button>
</form>"#,
        email = text_input("email", "Email", "email", &form.email, errors),
        name = text_input("name", "Name", "text", &form.name, errors),
        password = text_input("password", "Password", "password", "", errors),
    );

    layout(ctx, "Register", &body)
}

/// Login page, optionally with an error banner
pub fn login(
    ctx: &ViewContext,
    form: &LoginForm,
    errors: &FieldErrors,
    error: Option<&str>,
) -> Html<String> {
    let body = format!(
        r#"<h1>Log In</h1>
{banner}
<form method="post" action="/login" novalidate>
{email}{password}
  <button class="btn btn-primary" type="submit">Let Me In</button>
</form>"#,
        banner = error_banner(error),
        email = text_input("email", "Email", "email", &form.email, errors),
        password = text_input("password", "Password", "password", "", errors),
    );

    layout(ctx, "Log In", &body)
}

/// Add or edit form for a cafe, posting back to `action`
pub fn cafe_form(
    ctx: &ViewContext,
    heading: &str,
    action: &str,
    form: &CafeForm,
    errors: &FieldErrors,
) -> Html<String> {
    let fields = [
        ("name", "Cafe name", &form.name),
        ("location", "Location", &form.location),
        ("map_url", "Map URL", &form.map_url),
        ("img_url", "Image URL", &form.img_url),
        ("seats", "Seats (e.g. 20-30)", &form.seats),
        ("coffee_price", "Coffee price", &form.coffee_price),
        ("has_toilet", "Has toilet? (Yes/No)", &form.has_toilet),
        ("has_wifi", "Has wifi? (Yes/No)", &form.has_wifi),
        ("has_sockets", "Has sockets? (Yes/No)", &form.has_sockets),
        ("can_take_calls", "Can take calls? (Yes/No)", &form.can_take_calls),
    ];

    let inputs: String = fields
        .iter()
        .map(|(name, label, value)| text_input(name, label, "text", value, errors))
        .collect();

    let body = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}" novalidate>
{inputs}
  <button class="btn btn-primary" type="submit">Submit</button>
</form>"#,
        heading = escape(heading),
        action = escape(action),
        inputs = inputs,
    );

    layout(ctx, heading, &body)
}

/// Confirmation page before deleting a cafe
pub fn deletion_confirmation(ctx: &ViewContext, cafe: &Cafe) -> Html<String> {
    let body = format!(
        r#"<h1>Delete {name}?</h1>
<p class="lead">This permanently removes {name} from the listing.</p>
<form method="post" action="/delete/{id}">
  <button class="btn btn-secondary" type="submit" name="cancel" value="Cancel">Cancel</button>
  <button class="btn btn-danger" type="submit" name="delete" value="Delete">Delete</button>
</form>"#,
        name = escape(&cafe.name),
        id = cafe.id,
    );

    layout(ctx, "Delete cafe", &body)
}

/// Page shown for failed requests
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h1>{code} {title}</h1>
<p class="lead">{message}</p>
<a href="/">Back to the cafes</a>"#,
        code = status.as_u16(),
        title = escape(title),
        message = escape(message),
    );

    layout(&ViewContext::anonymous(), title, &body)
}
