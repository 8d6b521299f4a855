//! Posts listing rendered with the table widget.
//!
//! Table state lives in the query string: `sort`, `order`, `selected`
//! (comma separated post ids) and `lang`. A header link adds `click` and a
//! row link adds `toggle`; both are replayed against the rebuilt table so the
//! widget applies its own click and toggle rules.

use super::POSTS_PATH;
use crate::{
    html::escape,
    table::{CellValue, Column, Selection, SelectionMode, SortOrder, SortState, Table, TableLinks},
    web::{client::Authed, state::AppState, types::Post, views::layout},
};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, error, instrument};
use url::form_urlencoded;

#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    sort: Option<String>,
    order: Option<String>,
    selected: Option<String>,
    click: Option<String>,
    toggle: Option<String>,
    lang: Option<String>,
}

fn parse_ids(value: Option<&str>) -> Vec<i64> {
    value
        .unwrap_or_default()
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

fn price_cell(value: &CellValue, post: &Post) -> String {
    if post.is_free {
        return r#"<span class="font-medium text-emerald-700">Free</span>"#.to_string();
    }
    match value {
        CellValue::Number(price) => format!("{price:.2}"),
        other => escape(&other.to_string()),
    }
}

fn no_data_messages() -> HashMap<String, String> {
    HashMap::from([
        ("en".to_string(), "No posts found".to_string()),
        ("es".to_string(), "No se encontraron publicaciones".to_string()),
    ])
}

/// Builds the posts table from the query state and replays any pending click.
pub fn posts_table(query: &PostsQuery) -> Table<Post, i64> {
    let columns = vec![
        Column::new("title", "Title").sortable(),
        Column::new("description", "Description"),
        Column::new("price", "Price").sortable().render(price_cell),
        Column::new("city", "City").sortable(),
        Column::new("state", "State"),
    ];

    let sort = SortState::new(
        query.sort.clone().filter(|key| !key.is_empty()),
        SortOrder::parse(query.order.as_deref().unwrap_or_default()),
    );
    let selection = Selection::from_keys(
        SelectionMode::Multiple,
        parse_ids(query.selected.as_deref()),
    )
    .with_on_change(|selected: &[i64]| debug!(?selected, "Post selection changed"));

    let mut table = Table::new(columns, |post: &Post| post.id)
        .with_row_numbers(true)
        .with_no_data_message(no_data_messages())
        .with_language(query.lang.as_deref().unwrap_or("en"))
        .with_sort(sort)
        .with_selection(selection);

    if let Some(click) = query.click.as_deref() {
        if !table.click_header(click) {
            debug!(column = click, "Ignoring click on non-sortable column");
        }
    }
    if let Some(id) = query.toggle.as_deref().and_then(|id| id.trim().parse().ok()) {
        table.toggle_key(&id);
    }
    table
}

/// Encodes the current table state into `/dashboard/posts` links.
pub struct PostsLinks {
    sort: SortState,
    selected: Vec<i64>,
    lang: Option<String>,
}

impl PostsLinks {
    #[must_use]
    pub fn from_table(table: &Table<Post, i64>, lang: Option<&str>) -> Self {
        Self {
            sort: table.sort().clone(),
            selected: table.selection().selected().to_vec(),
            lang: lang.map(ToString::to_string),
        }
    }

    fn href(&self, action: (&str, &str)) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(key) = self.sort.key() {
            query.append_pair("sort", key);
            query.append_pair("order", self.sort.order().as_str());
        }
        if !self.selected.is_empty() {
            let ids: Vec<String> = self.selected.iter().map(ToString::to_string).collect();
            query.append_pair("selected", &ids.join(","));
        }
        if let Some(lang) = &self.lang {
            query.append_pair("lang", lang);
        }
        query.append_pair(action.0, action.1);
        format!("{POSTS_PATH}?{}", query.finish())
    }
}

impl TableLinks<i64> for PostsLinks {
    fn header_href(&self, column_key: &str) -> String {
        self.href(("click", column_key))
    }

    fn row_href(&self, row_key: &i64) -> String {
        self.href(("toggle", &row_key.to_string()))
    }
}

#[instrument(skip(state, headers, query))]
pub async fn posts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PostsQuery>,
) -> Response {
    let Some(credential) = state.sessions().credential(&headers) else {
        return state.sessions().evict_to_login();
    };

    let (user, posts) = tokio::join!(
        state.api().current_user(&credential),
        state.api().posts(&credential)
    );

    let user = match user {
        Ok(Authed::Ok(user)) => Some(user),
        Ok(Authed::Unauthorized) => return state.sessions().evict_to_login(),
        Err(err) => {
            error!("Failed to load current user: {err}");
            None
        }
    };
    let posts = match posts {
        Ok(Authed::Ok(posts)) => posts,
        Ok(Authed::Unauthorized) => return state.sessions().evict_to_login(),
        Err(err) => {
            error!("Failed to load posts: {err}");
            return err.into_response();
        }
    };

    let table = posts_table(&query);
    let links = PostsLinks::from_table(&table, query.lang.as_deref());
    let content = format!(
        r#"<section class="space-y-4"><div class="flex items-center justify-between"><h2 class="text-2xl font-semibold">Posts</h2><span class="text-sm text-gray-500">{} selected</span></div>{}</section>"#,
        table.selection().selected().len(),
        table.render_html(&posts, &links)
    );

    Html(layout::dashboard_shell(
        "Posts",
        user.as_ref(),
        POSTS_PATH,
        &content,
    ))
    .into_response()
}
