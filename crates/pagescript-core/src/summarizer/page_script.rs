//! Functions run in the page for summarization.

/// Element id of the summary overlay.
pub const OVERLAY_ID: &str = "pagescript-summary-overlay";

/// Returns the visible text of the page with chrome-like regions removed and
/// whitespace collapsed. Works on a clone so the page is left untouched.
pub const PAGE_TEXT_EXTRACTOR: &str = r#"function () {
  if (!document.body) {
    return '';
  }
  const root = document.body.cloneNode(true);
  root
    .querySelectorAll('script, style, nav, header, footer, aside, iframe, noscript, svg')
    .forEach((el) => el.remove());
  const text = root.innerText || root.textContent || '';
  return text.replace(/\s+/g, ' ').trim();
}"#;

/// Renders `{overview, points, keywords}` as a fixed panel with a close
/// button, replacing an existing one. Text is set through `textContent` only.
pub const OVERLAY_RENDERER: &str = r#"function (overlayId, summary) {
  const existing = document.getElementById(overlayId);
  if (existing) {
    existing.remove();
  }

  const panel = document.createElement('div');
  panel.id = overlayId;
  Object.assign(panel.style, {
    position: 'fixed',
    top: '16px',
    right: '16px',
    width: '360px',
    maxHeight: '70vh',
    overflowY: 'auto',
    zIndex: '2147483647',
    background: '#ffffff',
    color: '#1f2933',
    border: '1px solid #d0d7de',
    borderRadius: '8px',
    boxShadow: '0 8px 24px rgba(0, 0, 0, 0.2)',
    padding: '16px',
    font: '14px/1.5 system-ui, sans-serif',
  });

  const close = document.createElement('button');
  close.textContent = '×';
  close.setAttribute('aria-label', 'Close summary');
  Object.assign(close.style, {
    float: 'right',
    border: 'none',
    background: 'transparent',
    fontSize: '18px',
    cursor: 'pointer',
  });
  close.addEventListener('click', () => panel.remove());
  panel.appendChild(close);

  const overview = document.createElement('p');
  overview.style.fontWeight = '600';
  overview.textContent = summary.overview;
  panel.appendChild(overview);

  if (summary.points.length > 0) {
    const list = document.createElement('ul');
    for (const point of summary.points) {
      const item = document.createElement('li');
      item.textContent = point;
      list.appendChild(item);
    }
    panel.appendChild(list);
  }

  if (summary.keywords.length > 0) {
    const keywords = document.createElement('p');
    keywords.style.color = '#57606a';
    keywords.textContent = summary.keywords.map((k) => '#' + k).join(' ');
    panel.appendChild(keywords);
  }

  document.documentElement.appendChild(panel);
  return true;
}"#;
