use html_escape::decode_html_entities;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::domain::{RssFeed, RssItem};
use crate::fetcher::FetchError;

/// Reads the RSS 2.0 `<channel>`/`<item>` shape out of raw XML.
///
/// Parsing is lenient about content: the root element name is not checked
/// and any element outside the known channel and item fields is skipped,
/// including namespaced ones like `atom:link`. The XML itself must still be
/// well formed.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, feed_url: &str, body: &[u8]) -> Result<RssFeed, FetchError> {
        let parse_error = |reason: String| FetchError::Parse {
            url: feed_url.to_string(),
            reason,
        };

        let mut reader = Reader::from_reader(body);
        let mut buf = Vec::new();

        let mut feed = RssFeed::default();
        let mut stack: Vec<String> = Vec::new();
        let mut saw_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    open_element(&mut feed, &stack, &name);
                    if let Some(field) = field_mut(&mut feed, &stack, &name) {
                        field.clear();
                    }
                    stack.push(name);
                    saw_root = true;
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    open_element(&mut feed, &stack, &name);
                    if let Some(field) = field_mut(&mut feed, &stack, &name) {
                        field.clear();
                    }
                    saw_root = true;
                }
                Ok(Event::End(_)) => {
                    if stack.pop().is_none() {
                        return Err(parse_error("closing tag without a matching opening tag".into()));
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some((field, parents)) = stack.split_last() {
                        if let Some(target) = field_mut(&mut feed, parents, field) {
                            target.push_str(&unescape_lenient(&String::from_utf8_lossy(&e)));
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some((field, parents)) = stack.split_last() {
                        if let Some(target) = field_mut(&mut feed, parents, field) {
                            target.push_str(&String::from_utf8_lossy(&e.into_inner()));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(parse_error(format!("XML parse error: {}", e))),
            }
            buf.clear();
        }

        if !saw_root {
            return Err(parse_error("document has no root element".into()));
        }
        if let Some(open) = stack.last() {
            return Err(parse_error(format!("unexpected end of document inside <{}>", open)));
        }

        Ok(decode_feed(feed))
    }
}

/// Decode HTML entities such as `&amp;` or `&#8217;`.
pub fn decode_entities(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

/// XML-unescape `raw` one reference at a time.
///
/// References XML does not define (`&nbsp;`, `&eacute;`) are kept as written
/// so the HTML decoding pass can resolve them later.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };

        let reference = &tail[..=semi];
        match unescape(reference) {
            Ok(resolved) => out.push_str(&resolved),
            Err(_) => out.push_str(reference),
        }
        rest = &tail[semi + 1..];
    }

    out.push_str(rest);
    out
}

/// Start a new item when an `<item>` opens directly under `<channel>`.
fn open_element(feed: &mut RssFeed, parents: &[String], name: &str) {
    if name == "item" && parents.len() == 2 && parents[1] == "channel" {
        feed.items.push(RssItem::default());
    }
}

/// The text field fed by element `name` nested under `parents`, if any.
///
/// Channel fields sit at `root > channel > field`, item fields at
/// `root > channel > item > field`.
fn field_mut<'a>(feed: &'a mut RssFeed, parents: &[String], name: &str) -> Option<&'a mut String> {
    match parents {
        [_, channel] if channel == "channel" => match name {
            "title" => Some(&mut feed.title),
            "link" => Some(&mut feed.link),
            "description" => Some(&mut feed.description),
            _ => None,
        },
        [_, channel, item] if channel == "channel" && item == "item" => {
            let item = feed.items.last_mut()?;
            match name {
                "title" => Some(&mut item.title),
                "link" => Some(&mut item.link),
                "description" => Some(&mut item.description),
                "pubDate" => Some(&mut item.pub_date),
                _ => None,
            }
        }
        _ => None,
    }
}

fn decode_feed(mut feed: RssFeed) -> RssFeed {
    feed.title = decode_entities(&feed.title);
    feed.description = decode_entities(&feed.description);

    for item in &mut feed.items {
        item.title = decode_entities(&item.title);
        item.description = decode_entities(&item.description);
    }

    feed
}
