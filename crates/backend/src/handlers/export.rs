use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::{a001_post, a002_category};
use contracts::domain::a001_post::aggregate::{Post, PostKind};
use contracts::shared::list_state::Searchable;

/// Серверный экспорт списка записей. Принимает те же фильтры, что и
/// списковая форма, поэтому выгрузка совпадает с тем, что пользователь
/// видит на экране.
#[derive(Debug, Deserialize, Default)]
pub struct PostExportQuery {
    pub q: Option<String>,
    pub kind: Option<String>,
    pub category: Option<i64>,
}

struct ExportRow {
    post: Post,
    category_title: String,
}

impl Searchable for ExportRow {
    fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.post.base.title.to_lowercase().contains(&term)
            || self.post.base.slug.to_lowercase().contains(&term)
            || self.category_title.to_lowercase().contains(&term)
    }
}

async fn collect_rows(params: &PostExportQuery) -> anyhow::Result<Vec<ExportRow>> {
    let categories = a002_category::service::list_all().await?;
    let title_of = |id: Option<i64>| -> String {
        id.and_then(|id| {
            categories
                .iter()
                .find(|c| c.base.id.value() == id)
                .map(|c| c.base.title.clone())
        })
        .unwrap_or_else(|| "—".to_string())
    };

    let term = params.q.as_deref().unwrap_or("").trim().to_string();
    let kind = params.kind.as_deref().map(PostKind::from_code);

    let rows = a001_post::service::list_all()
        .await?
        .into_iter()
        .filter(|p| kind.map_or(true, |k| p.kind == k))
        .filter(|p| params.category.map_or(true, |c| p.category_ref.map(|r| r.value()) == Some(c)))
        .map(|p| {
            let category_title = title_of(p.category_ref.map(|r| r.value()));
            ExportRow {
                post: p,
                category_title,
            }
        })
        .filter(|row| term.is_empty() || row.matches_term(&term))
        .collect();
    Ok(rows)
}

fn attachment_headers(filename: &str, content_type: &str) -> [(header::HeaderName, String); 2] {
    [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename*=UTF-8''{}",
                urlencoding::encode(filename)
            ),
        ),
    ]
}

/// GET /api/post/export.csv
pub async fn posts_csv(Query(params): Query<PostExportQuery>) -> Result<Response, StatusCode> {
    let rows = collect_rows(&params)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    writer
        .write_record([
            "Заголовок",
            "Slug",
            "Рубрика",
            "Тип",
            "Статус",
            "Просмотры",
            "Обновлено",
        ])
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    for row in &rows {
        let p = &row.post;
        writer
            .write_record([
                p.base.title.as_str(),
                p.base.slug.as_str(),
                row.category_title.as_str(),
                p.kind.display_name(),
                if p.base.metadata.is_published {
                    "Опубликовано"
                } else {
                    "Черновик"
                },
                &p.view_count.to_string(),
                &p.base.metadata.updated_at.to_rfc3339(),
            ])
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    // BOM — чтобы Excel корректно открыл кириллицу
    let mut body = vec![0xEF, 0xBB, 0xBF];
    body.extend_from_slice(&bytes);

    Ok((
        attachment_headers("записи.csv", "text/csv; charset=utf-8"),
        body,
    )
        .into_response())
}

/// GET /api/post/export.json
pub async fn posts_json(Query(params): Query<PostExportQuery>) -> Result<Response, StatusCode> {
    let rows = collect_rows(&params)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let posts: Vec<Post> = rows.into_iter().map(|r| r.post).collect();
    let body =
        serde_json::to_vec_pretty(&posts).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok((
        attachment_headers("записи.json", "application/json; charset=utf-8"),
        body,
    )
        .into_response())
}
