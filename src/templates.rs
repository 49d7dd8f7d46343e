use askama::Template;

use crate::models::{Set, Theme};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: &'static str,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: &'static str,
}

#[derive(Template)]
#[template(path = "sets.html")]
pub struct SetsTemplate {
    pub page: &'static str,
    pub sets: Vec<Set>,
}

#[derive(Template)]
#[template(path = "set.html")]
pub struct SetTemplate {
    pub page: &'static str,
    pub set: Set,
}

#[derive(Template)]
#[template(path = "add_set.html")]
pub struct AddSetTemplate {
    pub page: &'static str,
    pub themes: Vec<Theme>,
}

#[derive(Template)]
#[template(path = "edit_set.html")]
pub struct EditSetTemplate {
    pub page: &'static str,
    pub set: Set,
    pub themes: Vec<Theme>,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub page: &'static str,
    pub msg: String,
}

#[derive(Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate {
    pub page: &'static str,
    pub message: String,
}
