//! Dashboard stylesheet, served at `/static/app.css`.
//!
//! One hand-written sheet, no build step. Theming runs on CSS custom
//! properties: light values on `:root`, dark overrides under
//! `[data-theme="dark"]`, and a `prefers-color-scheme` block for
//! `[data-theme="system"]`. The SVG renderer references the same
//! `--fsc-*` variables with hard-coded fallbacks, so figures follow
//! the page theme and still render when the sheet is absent.

pub const DASHBOARD_CSS: &str = r#"/* fsc dashboard */

:root {
  --fsc-bg: #f8fafc;
  --fsc-surface: #ffffff;
  --fsc-text: #0f172a;
  --fsc-muted: #6b7280;
  --fsc-border: #e2e8f0;
  --fsc-accent: #2563eb;
  --fsc-grid: #e5e7eb;
  --fsc-axis: #9ca3af;
  --fsc-c0: #2563eb;
  --fsc-c1: #f59e0b;
  --fsc-c2: #10b981;
  --fsc-c3: #ef4444;
}

[data-theme="dark"] {
  --fsc-bg: #0f172a;
  --fsc-surface: #1e293b;
  --fsc-text: #e2e8f0;
  --fsc-muted: #94a3b8;
  --fsc-border: #334155;
  --fsc-accent: #60a5fa;
  --fsc-grid: #334155;
  --fsc-axis: #64748b;
  --fsc-c0: #60a5fa;
  --fsc-c1: #fbbf24;
  --fsc-c2: #34d399;
  --fsc-c3: #f87171;
}

@media (prefers-color-scheme: dark) {
  [data-theme="system"] {
    --fsc-bg: #0f172a;
    --fsc-surface: #1e293b;
    --fsc-text: #e2e8f0;
    --fsc-muted: #94a3b8;
    --fsc-border: #334155;
    --fsc-accent: #60a5fa;
    --fsc-grid: #334155;
    --fsc-axis: #64748b;
    --fsc-c0: #60a5fa;
    --fsc-c1: #fbbf24;
    --fsc-c2: #34d399;
    --fsc-c3: #f87171;
  }
}

* { box-sizing: border-box; }

body {
  margin: 0;
  background: var(--fsc-bg);
  color: var(--fsc-text);
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  line-height: 1.5;
}

a { color: var(--fsc-accent); text-decoration: none; }
a:hover { text-decoration: underline; }

.fsc-nav {
  display: flex;
  align-items: baseline;
  gap: 1rem;
  padding: 0.75rem 1.5rem;
  background: var(--fsc-surface);
  border-bottom: 1px solid var(--fsc-border);
}

.fsc-nav .fsc-brand {
  font-weight: 700;
  font-size: 1.05rem;
  color: var(--fsc-text);
}

.fsc-main {
  max-width: 1100px;
  margin: 0 auto;
  padding: 1.5rem;
}

.fsc-footer {
  max-width: 1100px;
  margin: 0 auto;
  padding: 1rem 1.5rem 2rem;
  color: var(--fsc-muted);
  font-size: 0.85rem;
}

/* ── Overview grid ── */

.fsc-stats {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
  gap: 1rem;
  margin: 0 0 1.5rem;
}

.fsc-stat {
  display: flex;
  flex-direction: column;
  background: var(--fsc-surface);
  border: 1px solid var(--fsc-border);
  border-radius: 8px;
  padding: 0.9rem 1rem;
  color: var(--fsc-text);
}

.fsc-stat:hover { text-decoration: none; border-color: var(--fsc-accent); }

.fsc-stat-value {
  font-size: 1.6rem;
  font-weight: 700;
  line-height: 1.2;
}

.fsc-stat-label { font-size: 0.9rem; }

.fsc-stat-meta { color: var(--fsc-muted); font-size: 0.75rem; }

.fsc-cards {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(320px, 1fr));
  gap: 1rem;
}

.fsc-card {
  background: var(--fsc-surface);
  border: 1px solid var(--fsc-border);
  border-radius: 8px;
  padding: 1rem;
}

.fsc-card h2 {
  margin: 0 0 0.25rem;
  font-size: 1rem;
}

.fsc-card .fsc-meta {
  color: var(--fsc-muted);
  font-size: 0.8rem;
  margin: 0 0 0.5rem;
}

.fsc-card svg { width: 100%; height: auto; display: block; }

/* ── Chart page ── */

.fsc-chart-head h1 { margin: 0 0 0.25rem; font-size: 1.4rem; }
.fsc-subtitle { color: var(--fsc-muted); margin: 0 0 0.25rem; }
.fsc-unit { color: var(--fsc-muted); font-size: 0.85rem; margin: 0 0 1rem; }

.fsc-figure {
  background: var(--fsc-surface);
  border: 1px solid var(--fsc-border);
  border-radius: 8px;
  padding: 1rem;
  margin-bottom: 1rem;
}

.fsc-figure svg { width: 100%; height: auto; display: block; }

.fsc-controls {
  display: flex;
  flex-wrap: wrap;
  gap: 0.4rem;
  margin: 0 0 1rem;
}

.fsc-control {
  padding: 0.3rem 0.8rem;
  border: 1px solid var(--fsc-border);
  border-radius: 999px;
  background: var(--fsc-surface);
  color: var(--fsc-text);
  font-size: 0.85rem;
}

.fsc-control:hover { text-decoration: none; border-color: var(--fsc-accent); }

.fsc-control.active {
  background: var(--fsc-accent);
  border-color: var(--fsc-accent);
  color: #ffffff;
}

.fsc-table-wrap { overflow-x: auto; margin-bottom: 1rem; }

.fsc-table {
  width: 100%;
  border-collapse: collapse;
  background: var(--fsc-surface);
  border: 1px solid var(--fsc-border);
  border-radius: 8px;
  font-size: 0.9rem;
}

.fsc-table th,
.fsc-table td {
  padding: 0.45rem 0.75rem;
  border-bottom: 1px solid var(--fsc-border);
  text-align: right;
}

.fsc-table th:first-child,
.fsc-table td:first-child { text-align: left; }

.fsc-table thead th {
  color: var(--fsc-muted);
  font-weight: 600;
  text-transform: uppercase;
  font-size: 0.75rem;
  letter-spacing: 0.03em;
}

.fsc-source { color: var(--fsc-muted); font-size: 0.85rem; margin: 0 0 1.5rem; }

/* ── Embed panel ── */

.fsc-embed-panel {
  background: var(--fsc-surface);
  border: 1px solid var(--fsc-border);
  border-radius: 8px;
  padding: 1rem;
}

.fsc-embed-panel h2 { margin: 0 0 0.5rem; font-size: 1rem; }

.fsc-embed-panel .fsc-embed-url {
  font-family: ui-monospace, monospace;
  font-size: 0.8rem;
  color: var(--fsc-muted);
  word-break: break-all;
  margin: 0 0 0.5rem;
}

.fsc-snippet {
  width: 100%;
  min-height: 7rem;
  font-family: ui-monospace, monospace;
  font-size: 0.78rem;
  background: var(--fsc-bg);
  color: var(--fsc-text);
  border: 1px solid var(--fsc-border);
  border-radius: 6px;
  padding: 0.5rem;
  resize: vertical;
}

.fsc-copy {
  margin-top: 0.5rem;
  padding: 0.35rem 1rem;
  border: none;
  border-radius: 6px;
  background: var(--fsc-accent);
  color: #ffffff;
  font-size: 0.85rem;
  cursor: pointer;
}

.fsc-copy:active { opacity: 0.85; }

/* ── Embed page ── */

body.fsc-embed-body {
  background: var(--fsc-surface);
  padding: 0.75rem;
}

body.fsc-embed-body.fsc-compact { padding: 0.25rem; }

.fsc-embed-title { margin: 0 0 0.5rem; font-size: 1.05rem; }

.fsc-compact .fsc-embed-title { font-size: 0.9rem; margin-bottom: 0.25rem; }

.fsc-embed-source { color: var(--fsc-muted); font-size: 0.75rem; margin: 0.5rem 0 0; }

/* ── Error pages ── */

.fsc-error {
  text-align: center;
  padding: 3rem 1rem;
  color: var(--fsc-muted);
}

.fsc-error h1 { color: var(--fsc-text); }
"#;
