//! Local evaluation of built queries over JSON documents.
//!
//! Covers the subset the query builder emits: type/equality/defined/path
//! filters, multi-key ordering, slices and projections with dereferences.
//!
//! - a `null` or missing sort key sorts after every present key, in both
//!   directions; the hosted engine reverses it with the rest under `desc`
//! - numbers compare numerically, strings by code point
//! - `->` looks up the document whose `_id` equals the reference's `_ref`;
//!   on a bare array it gives `null`
//! - `[]` maps the rest of the path over each array element
//! - projected keys whose value is `null` are left out of the output object

use std::borrow::Cow;
use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, HashSet};

use content_groq::{
    Direction, Filter, GroqError, GroqQuery, Operand, Projection, ProjectionField, QueryParams,
    Segment, Slice,
};
use serde_json::{Map, Value};

use crate::{ContentError, Perspective};

const DRAFTS_PATTERN: &str = "drafts.**";
const DRAFTS_PREFIX: &str = "drafts.";

/// Run a built query over a document set.
pub fn evaluate(query: &GroqQuery, documents: &[Value]) -> Result<Value, ContentError> {
    if let Some(raw) = query.raw_text() {
        return Err(ContentError::UnsupportedQuery(format!(
            "raw queries cannot be evaluated locally: {}",
            raw
        )));
    }
    query.validate()?;

    let mut matched = Vec::new();
    for doc in documents {
        if matches_all(doc, query.filters(), query.params(), documents)? {
            matched.push(doc);
        }
    }

    if !query.ordering().is_empty() {
        // sort_by is stable, so ties keep document order.
        matched.sort_by(|a, b| {
            for key in query.ordering() {
                let left = resolve(a, key.field.segments(), documents);
                let right = resolve(b, key.field.segments(), documents);
                let ord = compare_keys(&left, &right, key.direction);
                if ord != CmpOrdering::Equal {
                    return ord;
                }
            }
            CmpOrdering::Equal
        });
    }

    let shape = |doc: &Value| match query.projection() {
        Some(projection) => project(doc, projection, documents),
        None => doc.clone(),
    };

    let result = match query.slice_spec() {
        Some(Slice::Index(i)) => matched.get(i).map(|d| shape(*d)).unwrap_or(Value::Null),
        Some(Slice::Range { start, end }) => {
            let end = end.min(matched.len());
            let start = start.min(end);
            Value::Array(matched[start..end].iter().map(|d| shape(*d)).collect())
        }
        None => Value::Array(matched.iter().map(|d| shape(*d)).collect()),
    };
    Ok(result)
}

/// The documents a query sees under `perspective`.
///
/// `Published` drops drafts. `PreviewDrafts` replaces each published document
/// with its draft, if any, under the published `_id` (the draft id moves to
/// `_originalId`); drafts never published appear the same way. `Raw` is the
/// store as-is.
pub(crate) fn perspective_view(documents: &[Value], perspective: Perspective) -> Cow<'_, [Value]> {
    match perspective {
        Perspective::Raw => Cow::Borrowed(documents),
        Perspective::Published => Cow::Owned(
            documents
                .iter()
                .filter(|doc| document_id(doc).and_then(draft_target).is_none())
                .cloned()
                .collect(),
        ),
        Perspective::PreviewDrafts => {
            let drafts: HashMap<&str, &Value> = documents
                .iter()
                .filter_map(|doc| Some((document_id(doc).and_then(draft_target)?, doc)))
                .collect();
            let published: HashSet<&str> = documents
                .iter()
                .filter_map(document_id)
                .filter(|id| draft_target(id).is_none())
                .collect();

            let mut view = Vec::with_capacity(documents.len());
            for doc in documents {
                let Some(id) = document_id(doc) else {
                    view.push(doc.clone());
                    continue;
                };
                match draft_target(id) {
                    Some(target) if published.contains(target) => {}
                    Some(target) => view.push(overlay(doc, target)),
                    None => match drafts.get(id) {
                        Some(draft) => view.push(overlay(draft, id)),
                        None => view.push(doc.clone()),
                    },
                }
            }
            Cow::Owned(view)
        }
    }
}

fn document_id(doc: &Value) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

/// The published id a draft id stands in for.
fn draft_target(id: &str) -> Option<&str> {
    if path_matches(DRAFTS_PATTERN, id) {
        id.strip_prefix(DRAFTS_PREFIX)
    } else {
        None
    }
}

fn overlay(draft: &Value, published_id: &str) -> Value {
    let mut doc = draft.clone();
    if let Value::Object(map) = &mut doc {
        if let Some(original) = map.insert("_id".to_string(), Value::String(published_id.to_string())) {
            map.insert("_originalId".to_string(), original);
        }
    }
    doc
}

fn matches_all(
    doc: &Value,
    filters: &[Filter],
    params: &QueryParams,
    documents: &[Value],
) -> Result<bool, ContentError> {
    for filter in filters {
        if !matches(doc, filter, params, documents)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches(
    doc: &Value,
    filter: &Filter,
    params: &QueryParams,
    documents: &[Value],
) -> Result<bool, ContentError> {
    let matched = match filter {
        Filter::Type(name) => doc.get("_type").and_then(Value::as_str) == Some(name.as_str()),
        Filter::Eq(path, operand) => {
            let left = resolve(doc, path.segments(), documents);
            values_equal(&left, operand_value(operand, params)?)
        }
        Filter::Neq(path, operand) => {
            let left = resolve(doc, path.segments(), documents);
            !values_equal(&left, operand_value(operand, params)?)
        }
        Filter::Defined(path) => !resolve(doc, path.segments(), documents).is_null(),
        Filter::NotInPath(pattern) => match doc.get("_id").and_then(Value::as_str) {
            Some(id) => !path_matches(pattern, id),
            None => true,
        },
    };
    Ok(matched)
}

fn operand_value<'a>(operand: &'a Operand, params: &'a QueryParams) -> Result<&'a Value, ContentError> {
    match operand {
        Operand::Literal(value) => Ok(value),
        Operand::Param(name) => params
            .get(name)
            .ok_or_else(|| GroqError::MissingParam(name.clone()).into()),
    }
}

/// `path("drafts.**")` matches any id below `drafts.`; `*` matches one dotted segment.
fn path_matches(pattern: &str, id: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("**") {
        id.starts_with(prefix) && id.len() > prefix.len()
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        id.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && !rest.contains('.'))
    } else {
        pattern == id
    }
}

/// Follow a path from `value`. Missing attributes and dangling references give `null`.
fn resolve(value: &Value, segments: &[Segment], documents: &[Value]) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return value.clone();
    };

    match head {
        Segment::Attr(name) => match value {
            Value::Object(map) => resolve(map.get(name).unwrap_or(&Value::Null), rest, documents),
            _ => Value::Null,
        },
        Segment::Deref => resolve(&dereference(value, documents), rest, documents),
        Segment::Each => match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| resolve(item, rest, documents))
                    .collect(),
            ),
            _ => Value::Null,
        },
        Segment::Index(i) => match value {
            Value::Array(items) => {
                resolve(items.get(*i).unwrap_or(&Value::Null), rest, documents)
            }
            _ => Value::Null,
        },
    }
}

fn dereference(value: &Value, documents: &[Value]) -> Value {
    let Some(target) = value.get("_ref").and_then(Value::as_str) else {
        return Value::Null;
    };
    documents
        .iter()
        .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(target))
        .cloned()
        .unwrap_or(Value::Null)
}

fn project(value: &Value, projection: &Projection, documents: &[Value]) -> Value {
    let Value::Object(source) = value else {
        return Value::Null;
    };

    let mut out = Map::new();
    for entry in projection.entries() {
        match entry {
            ProjectionField::Spread => {
                for (k, v) in source {
                    out.insert(k.clone(), v.clone());
                }
            }
            ProjectionField::Attr(name) => {
                insert_present(&mut out, name, source.get(name).cloned().unwrap_or(Value::Null));
            }
            ProjectionField::Alias { name, path } => {
                insert_present(&mut out, name, resolve(value, path.segments(), documents));
            }
            ProjectionField::Nested {
                name,
                path,
                projection,
            } => {
                let target = resolve(value, path.segments(), documents);
                insert_present(&mut out, name, project_each(&target, projection, documents));
            }
        }
    }
    Value::Object(out)
}

fn project_each(value: &Value, projection: &Projection, documents: &[Value]) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| project_each(item, projection, documents))
                .collect(),
        ),
        Value::Object(_) => project(value, projection, documents),
        _ => Value::Null,
    }
}

/// Store a projected key. A `null` result also drops a value copied in by a spread.
fn insert_present(out: &mut Map<String, Value>, name: &str, value: Value) {
    if value.is_null() {
        out.remove(name);
    } else {
        out.insert(name.to_string(), value);
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => left == right,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Array(_) | Value::Object(_) => 3,
        Value::Null => 4,
    }
}

fn compare_keys(left: &Value, right: &Value, direction: Direction) -> CmpOrdering {
    match (left.is_null(), right.is_null()) {
        (true, true) => return CmpOrdering::Equal,
        (true, false) => return CmpOrdering::Greater,
        (false, true) => return CmpOrdering::Less,
        _ => {}
    }

    let ord = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    };

    match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_groq::FieldPath;
    use serde_json::json;

    fn resolve_path(doc: &Value, path: &FieldPath, documents: &[Value]) -> Value {
        resolve(doc, path.segments(), documents)
    }

    fn store() -> Vec<Value> {
        vec![
            json!({ "_id": "cat-1", "_type": "blogcategory", "title": "News" }),
            json!({ "_id": "cat-2", "_type": "blogcategory", "title": "Guides" }),
            json!({ "_id": "img-1", "_type": "sanity.imageAsset", "url": "https://cdn/img-1.png" }),
            json!({
                "_id": "post-a", "_type": "blog", "title": "A", "publishedAt": "2024-03-01T00:00:00Z",
                "blogcategories": [{ "_ref": "cat-1" }, { "_ref": "cat-2" }]
            }),
            json!({ "_id": "post-b", "_type": "blog", "title": "B", "publishedAt": "2024-05-01T00:00:00Z" }),
            json!({ "_id": "post-c", "_type": "blog", "title": "C" }),
            json!({ "_id": "drafts.post-a", "_type": "blog", "title": "A (draft)", "publishedAt": "2024-06-01T00:00:00Z" }),
            json!({ "_id": "v1", "_type": "productVariant", "title": "Gadget", "order": 2, "icon": { "asset": { "_ref": "img-1" } } }),
            json!({ "_id": "v2", "_type": "productVariant", "title": "Appliance", "order": 1.0 }),
        ]
    }

    // === Filter Tests ===

    #[test]
    fn test_type_filter() {
        let docs = store();
        let result = evaluate(&GroqQuery::of_type("productVariant"), &docs).unwrap();
        assert_eq!(result.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_published_only_excludes_drafts() {
        let docs = store();
        let query = GroqQuery::of_type("blog").filter(Filter::published_only());
        let result = evaluate(&query, &docs).unwrap();
        let ids: Vec<&str> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["post-a", "post-b", "post-c"]);
    }

    #[test]
    fn test_eq_with_param() {
        let docs = store();
        let query = GroqQuery::documents()
            .filter(Filter::eq(FieldPath::attr("title"), Operand::param("title")))
            .param("title", json!("B"))
            .unwrap();
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(result[0]["_id"], "post-b");
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let docs = store();
        let query = GroqQuery::documents().filter(Filter::eq(
            FieldPath::attr("order"),
            Operand::Literal(json!(1)),
        ));
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(result[0]["_id"], "v2");
    }

    #[test]
    fn test_defined_filter() {
        let docs = store();
        let query = GroqQuery::of_type("blog").filter(Filter::defined(FieldPath::attr("publishedAt")));
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(result.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_path_patterns() {
        assert!(path_matches("drafts.**", "drafts.post-a"));
        assert!(path_matches("drafts.**", "drafts.a.b"));
        assert!(!path_matches("drafts.**", "post-a"));
        assert!(!path_matches("drafts.**", "drafts."));
        assert!(path_matches("drafts.*", "drafts.a"));
        assert!(!path_matches("drafts.*", "drafts.a.b"));
        assert!(path_matches("post-a", "post-a"));
    }

    // === Perspective Tests ===

    #[test]
    fn test_published_view_drops_drafts() {
        let docs = store();
        let view = perspective_view(&docs, Perspective::Published);
        assert_eq!(view.len(), docs.len() - 1);
        assert!(view.iter().all(|d| d["_id"] != "drafts.post-a"));
    }

    #[test]
    fn test_preview_view_overlays_in_place() {
        let docs = store();
        let view = perspective_view(&docs, Perspective::PreviewDrafts);
        assert_eq!(view.len(), docs.len() - 1);
        assert_eq!(view[3]["_id"], "post-a");
        assert_eq!(view[3]["title"], "A (draft)");
        assert_eq!(view[3]["_originalId"], "drafts.post-a");
        assert_eq!(view[4]["_id"], "post-b");
    }

    #[test]
    fn test_raw_view_borrows() {
        let docs = store();
        assert!(matches!(perspective_view(&docs, Perspective::Raw), Cow::Borrowed(_)));
    }

    #[test]
    fn test_draft_target() {
        assert_eq!(draft_target("drafts.post-a"), Some("post-a"));
        assert_eq!(draft_target("drafts."), None);
        assert_eq!(draft_target("post-a"), None);
    }

    // === Ordering and Slice Tests ===

    #[test]
    fn test_order_desc_puts_missing_last() {
        let docs = store();
        let query = GroqQuery::of_type("blog")
            .filter(Filter::published_only())
            .order_by(FieldPath::attr("publishedAt"), Direction::Desc);
        let result = evaluate(&query, &docs).unwrap();
        let ids: Vec<&str> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["post-b", "post-a", "post-c"]);
    }

    #[test]
    fn test_order_mixed_integer_and_float() {
        let docs = store();
        let query = GroqQuery::of_type("productVariant")
            .order_by(FieldPath::attr("order"), Direction::Asc);
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(result[0]["_id"], "v2");
        assert_eq!(result[1]["_id"], "v1");
    }

    #[test]
    fn test_range_slice_clamps() {
        let docs = store();
        let query = GroqQuery::of_type("blog").slice(Slice::take(50));
        assert_eq!(evaluate(&query, &docs).unwrap().as_array().unwrap().len(), 4);

        let query = GroqQuery::of_type("blog").slice(Slice::range(10, 20));
        assert_eq!(evaluate(&query, &docs).unwrap(), json!([]));
    }

    #[test]
    fn test_index_slice_missing_is_null() {
        let docs = store();
        let query = GroqQuery::of_type("author").slice(Slice::first());
        assert_eq!(evaluate(&query, &docs).unwrap(), Value::Null);
    }

    // === Projection Tests ===

    #[test]
    fn test_alias_through_reference() {
        let docs = store();
        let query = GroqQuery::of_type("productVariant")
            .order_by(FieldPath::attr("order"), Direction::Asc)
            .project(
                Projection::new()
                    .fields(&["_id", "title"])
                    .alias("icon", FieldPath::parse("icon.asset->url").unwrap()),
            );
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(result[0], json!({ "_id": "v2", "title": "Appliance" }));
        assert_eq!(
            result[1],
            json!({ "_id": "v1", "title": "Gadget", "icon": "https://cdn/img-1.png" })
        );
    }

    #[test]
    fn test_nested_projection_over_references() {
        let docs = store();
        let query = GroqQuery::documents()
            .filter(Filter::eq(FieldPath::attr("_id"), Operand::string("post-a")))
            .slice(Slice::first())
            .project(Projection::new().field("_id").nested(
                "blogcategories",
                FieldPath::attr("blogcategories").each().deref(),
                Projection::new().fields(&["_id", "title"]),
            ));
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(
            result,
            json!({
                "_id": "post-a",
                "blogcategories": [
                    { "_id": "cat-1", "title": "News" },
                    { "_id": "cat-2", "title": "Guides" }
                ]
            })
        );
    }

    #[test]
    fn test_each_then_attr() {
        let docs = store();
        let post = &docs[3];
        let titles = resolve_path(post, &FieldPath::parse("blogcategories[]->title").unwrap(), &docs);
        assert_eq!(titles, json!(["News", "Guides"]));
    }

    #[test]
    fn test_deref_of_bare_array_is_null() {
        let docs = store();
        let post = &docs[3];
        let bare = resolve_path(post, &FieldPath::attr("blogcategories").deref().then("title"), &docs);
        assert_eq!(bare, Value::Null);
        let mapped = resolve_path(post, &FieldPath::attr("blogcategories").each().deref(), &docs);
        assert_eq!(mapped.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_dangling_reference_is_null() {
        let docs = vec![json!({ "_id": "x", "author": { "_ref": "missing" } })];
        let name = resolve_path(&docs[0], &FieldPath::parse("author->name").unwrap(), &docs);
        assert_eq!(name, Value::Null);
    }

    #[test]
    fn test_spread_keeps_everything() {
        let docs = store();
        let query = GroqQuery::documents()
            .filter(Filter::eq(FieldPath::attr("_id"), Operand::string("cat-1")))
            .project(Projection::new().spread());
        let result = evaluate(&query, &docs).unwrap();
        assert_eq!(result[0], docs[0]);
    }

    #[test]
    fn test_null_projection_drops_spread_value() {
        let docs = vec![json!({ "_id": "i1", "product": { "_ref": "gone" } })];
        let query = GroqQuery::documents().project(Projection::new().spread().nested(
            "product",
            FieldPath::attr("product").deref(),
            Projection::new().field("name"),
        ));
        assert_eq!(evaluate(&query, &docs).unwrap(), json!([{ "_id": "i1" }]));
    }

    // === Error Tests ===

    #[test]
    fn test_raw_query_unsupported() {
        let err = evaluate(&GroqQuery::raw("*[_type == 'blog']"), &store()).unwrap_err();
        assert!(matches!(err, ContentError::UnsupportedQuery(_)));
    }

    #[test]
    fn test_missing_param() {
        let query = GroqQuery::documents()
            .filter(Filter::eq(FieldPath::attr("title"), Operand::param("title")));
        let err = evaluate(&query, &store()).unwrap_err();
        assert!(matches!(err, ContentError::Query(_)));
    }
}
