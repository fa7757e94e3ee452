//! Template files shared by the integration tests.

pub const CARDS_PATH: &str = "/blocks/cards/cards.html";

/// A cards block: a list of cards, each rendered through a named fragment.
pub const CARDS_TEMPLATE: &str = r#"
<template>
  <ul data-fly-test="cards">
    <li data-fly-repeat.card="cards" class="card ${card.variant}" data-fly-include="card"></li>
  </ul>
  <p data-fly-not="cards">No cards yet</p>
</template>

<template data-fly-name="card">
  <div class="card-image" data-fly-test="card.image"><img src="${card.image}" alt="${card.title}"></div>
  <div class="card-body">
    <h3 data-fly-content="card.title"></h3>
    <p>${card.text}</p>
  </div>
</template>
"#;

pub const HERO_PATH: &str = "/blocks/hero/hero.html";

/// A hero block that reads the authored block markup.
pub const HERO_TEMPLATE: &str = r#"<template><div><div>${heading}</div></div><div><div><h1>${block.firstElementChild.textContent}</h1></div></div></template>"#;

pub const SHARED_PATH: &str = "/shared/parts.html";

pub const SHARED_TEMPLATE: &str = r#"
<template data-fly-name="badge"><span class="badge">${label}</span></template>
<template data-fly-name="link"><a href="${link.href}" data-fly-attributes="link.attrs">${link.text}</a></template>
"#;
