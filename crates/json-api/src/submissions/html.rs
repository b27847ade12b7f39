//! Admin submissions page.

use std::fmt::{Error as FmtError, Result as FmtResult, Write as _};

use shopform_app::domain::{
    shops::ShopDomain,
    submissions::{
        data::{MAX_RATING, Registration, Review, SubmissionDetails},
        records::SubmissionRecord,
    },
};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#202223}\
h1{font-size:1.5rem}h2{font-size:1.2rem;margin-top:2rem}\
.review{border:1px solid #e1e3e5;border-radius:8px;padding:1rem;margin-bottom:1rem}\
.stars{color:#ffb800;letter-spacing:2px}.meta{color:#6d7175;font-size:.85rem}\
.review img{max-width:240px;border-radius:4px}\
table{border-collapse:collapse;width:100%}th,td{text-align:left;padding:.5rem;border-bottom:1px solid #e1e3e5}";

/// Render every submission for `shop`, reviews first.
pub(crate) fn render_submissions_page(
    shop: &ShopDomain,
    records: &[SubmissionRecord],
) -> Result<String, FmtError> {
    let shop = escape_html(shop.as_str());

    let reviews: Vec<_> = records
        .iter()
        .filter_map(|record| match &record.details {
            SubmissionDetails::Review(review) => Some((record, review)),
            SubmissionDetails::Registration(_) => None,
        })
        .collect();

    let registrations: Vec<_> = records
        .iter()
        .filter_map(|record| match &record.details {
            SubmissionDetails::Registration(registration) => Some((record, registration)),
            SubmissionDetails::Review(_) => None,
        })
        .collect();

    let mut page = String::with_capacity(4096);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(page, "<title>Submissions for {shop}</title>")?;
    writeln!(page, "<style>{STYLE}</style>\n</head>\n<body>")?;
    writeln!(page, "<h1>Submissions for {shop}</h1>")?;
    writeln!(
        page,
        "<p class=\"meta\">{} reviews, {} registrations</p>",
        reviews.len(),
        registrations.len()
    )?;

    page.push_str("<h2>Reviews</h2>\n");

    if reviews.is_empty() {
        page.push_str("<p>No reviews yet.</p>\n");
    }

    for (record, review) in reviews {
        render_review(&mut page, record, review)?;
    }

    page.push_str("<h2>Registrations</h2>\n");

    if registrations.is_empty() {
        page.push_str("<p>No registrations yet.</p>\n");
    } else {
        page.push_str("<table>\n<tr><th>Name</th><th>Email</th><th>Submitted</th></tr>\n");

        for (record, registration) in registrations {
            render_registration(&mut page, record, registration)?;
        }

        page.push_str("</table>\n");
    }

    page.push_str("</body>\n</html>\n");

    Ok(page)
}

fn render_review(page: &mut String, record: &SubmissionRecord, review: &Review) -> FmtResult {
    let product = review.product.title.as_deref().unwrap_or(&review.product.id);

    page.push_str("<div class=\"review\">\n");
    writeln!(page, "<h3>{}</h3>", escape_html(product))?;
    writeln!(
        page,
        "<p class=\"stars\" title=\"{} out of {MAX_RATING}\">{}</p>",
        review.rating.get(),
        stars(review.rating.get())
    )?;
    write!(page, "<p><strong>{}</strong>", escape_html(&review.display_name))?;

    if let Some(email) = &review.email {
        write!(page, " &lt;{}&gt;", escape_html(email))?;
    }

    page.push_str("</p>\n");
    writeln!(page, "<p>{}</p>", escape_html(&review.message))?;

    if let Some(image_url) = &review.image_url {
        writeln!(
            page,
            "<p><img src=\"{}\" alt=\"Review image\"></p>",
            escape_html(image_url)
        )?;
    }

    writeln!(page, "<p class=\"meta\">{}</p>\n</div>", format_timestamp(record))
}

fn render_registration(
    page: &mut String,
    record: &SubmissionRecord,
    registration: &Registration,
) -> FmtResult {
    writeln!(
        page,
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&registration.display_name),
        escape_html(&registration.email),
        format_timestamp(record)
    )
}

fn format_timestamp(record: &SubmissionRecord) -> String {
    format!("{} UTC", record.created_at.strftime("%Y-%m-%d %H:%M"))
}

/// `rating` filled stars followed by empty ones.
fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    let empty = usize::from(MAX_RATING) - filled;

    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use shopform_app::domain::submissions::records::SubmissionUuid;
    use testresult::TestResult;

    use crate::test_helpers::{make_registration, make_review, test_shop};

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x's")</script> & co"#),
            "&lt;script&gt;alert(&quot;x&#39;s&quot;)&lt;/script&gt; &amp; co"
        );
    }

    #[test]
    fn stars_fill_up_to_the_rating() {
        assert_eq!(stars(1), "★☆☆☆☆");
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn empty_page_says_so() -> TestResult {
        let page = render_submissions_page(&test_shop(), &[])?;

        assert!(page.contains("Submissions for teapots.myshopify.com"));
        assert!(page.contains("No reviews yet."));
        assert!(page.contains("No registrations yet."));

        Ok(())
    }

    #[test]
    fn page_lists_reviews_and_registrations() -> TestResult {
        let records = vec![
            make_review(SubmissionUuid::new(), 4),
            make_registration(SubmissionUuid::new()),
        ];

        let page = render_submissions_page(&test_shop(), &records)?;

        assert!(page.contains("1 reviews, 1 registrations"));
        assert!(page.contains("<h3>Teapot</h3>"));
        assert!(page.contains("★★★★☆"));
        assert!(page.contains("Pours without dripping"));
        assert!(page.contains("<td>ada@example.com</td>"));
        assert!(page.contains("1970-01-01 00:00 UTC"));

        Ok(())
    }

    #[test]
    fn user_content_is_escaped() -> TestResult {
        let mut record = make_review(SubmissionUuid::new(), 5);

        if let SubmissionDetails::Review(review) = &mut record.details {
            review.message = "<b>bold</b>".to_string();
            review.image_url = Some("https://cdn.example.com/a.png\" onerror=\"x".to_string());
        }

        let page = render_submissions_page(&test_shop(), &[record])?;

        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
        assert!(page.contains("a.png&quot; onerror=&quot;x"));

        Ok(())
    }
}
