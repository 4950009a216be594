use {
  super::*,
  scraper::{Html, Selector},
};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Classified inscription content.
///
/// `Genesis` carries a validated full protocol; whether it deploys a new
/// collection or mints into an existing one depends on store state and is
/// decided by the writer. `Mint` is an HTML/SVG carrier referencing its
/// collection by `(name, genesis inscription id)`; resolution also happens
/// in the writer. Anything non-conforming is `Opaque` and is indexed as a
/// plain inscription with no protocol effect.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
  Genesis(Mrc721Protocol),
  Mint(CarrierMint),
  Mrc20(Mrc20Op),
  Opaque,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarrierMint {
  pub name: String,
  pub genesis_id: String,
  pub carrier: Carrier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Carrier {
  Html,
  Svg,
}

impl Display for Carrier {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Html => write!(f, "html"),
      Self::Svg => write!(f, "svg"),
    }
  }
}

#[derive(Deserialize)]
struct ProtocolProbe {
  #[serde(default)]
  p: String,
}

impl Payload {
  pub fn classify(content: &[u8]) -> Self {
    let trimmed = content.trim_ascii();

    if trimmed.starts_with(b"<!DOCTYPE html>") || trimmed.starts_with(b"<html>") {
      return html_mint(trimmed).map(Self::Mint).unwrap_or(Self::Opaque);
    }

    if trimmed.starts_with(b"<svg") {
      return svg_mint(trimmed).map(Self::Mint).unwrap_or(Self::Opaque);
    }

    let Ok(probe) = serde_json::from_slice::<ProtocolProbe>(content) else {
      return Self::Opaque;
    };

    match probe.p.as_str() {
      MRC721_PROTOCOL => match Mrc721Protocol::from_json(content) {
        Some(protocol) if protocol.validate().is_ok() => Self::Genesis(protocol),
        _ => Self::Opaque,
      },
      MRC20_PROTOCOL => match Mrc20Op::from_json(content) {
        Some(op) if op.validate().is_ok() => Self::Mrc20(op),
        _ => Self::Opaque,
      },
      _ => Self::Opaque,
    }
  }
}

/// An HTML carrier must have a `<body>` with non-empty `name` and `mrc-721`
/// attributes plus an `<img>` with a non-empty `src`.
fn html_mint(content: &[u8]) -> Option<CarrierMint> {
  let text = std::str::from_utf8(content).ok()?;
  let document = Html::parse_document(text);

  let body = Selector::parse("body").expect("static selector");
  let img = Selector::parse("img").expect("static selector");

  let (name, genesis_id) = document.select(&body).find_map(|body| {
    let name = body.value().attr("name")?;
    let genesis_id = body.value().attr("mrc-721")?;
    (!name.is_empty() && !genesis_id.is_empty()).then(|| (name.to_string(), genesis_id.to_string()))
  })?;

  document
    .select(&img)
    .any(|img| img.value().attr("src").is_some_and(|src| !src.is_empty()))
    .then_some(CarrierMint {
      name,
      genesis_id,
      carrier: Carrier::Html,
    })
}

/// An SVG carrier must be rooted at an `<svg>` element in the SVG namespace
/// with non-empty `mrc721` and `mrc721id` attributes.
fn svg_mint(content: &[u8]) -> Option<CarrierMint> {
  let text = std::str::from_utf8(content).ok()?;
  let document = roxmltree::Document::parse(text).ok()?;
  let root = document.root_element();

  if root.tag_name().name() != "svg" || root.tag_name().namespace() != Some(SVG_NAMESPACE) {
    return None;
  }

  let name = root.attribute("mrc721")?;
  let genesis_id = root.attribute("mrc721id")?;

  (!name.is_empty() && !genesis_id.is_empty()).then(|| CarrierMint {
    name: name.to_string(),
    genesis_id: genesis_id.to_string(),
    carrier: Carrier::Svg,
  })
}
