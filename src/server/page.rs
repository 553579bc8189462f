//! Embedded dashboard page (self-contained, no external resources).

pub const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Veridoc — Document Authenticity</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917; padding: 24px;
      max-width: 960px; margin: 0 auto;
    }
    header { text-align: center; margin-bottom: 32px; }
    h1 { font-size: 28px; margin-bottom: 8px; }
    header p { color: #78716c; font-size: 14px; }
    .card {
      background: white; border: 1px solid #e7e5e4; border-radius: 12px;
      padding: 20px; margin-bottom: 16px;
    }
    .card h2 { font-size: 16px; margin-bottom: 12px; }
    .dropzone {
      border: 2px dashed #d6d3d1; border-radius: 12px; padding: 40px;
      text-align: center; cursor: pointer; transition: border-color 0.2s, background 0.2s;
      color: #78716c;
    }
    .dropzone.dragover { border-color: #4a7c59; background: #f0f7f2; }
    .dropzone .hint { font-size: 12px; color: #a8a29e; margin-top: 8px; }
    #file-input { display: none; }
    .file-row { display: flex; align-items: center; justify-content: space-between; margin-top: 16px; }
    .file-meta { font-size: 13px; color: #78716c; }
    .btn {
      padding: 10px 20px; border-radius: 10px; font-size: 14px; font-weight: 500;
      cursor: pointer; border: none; background: #4a7c59; color: white;
    }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    .progress-wrap { margin-top: 16px; }
    .progress-bar { height: 6px; background: #e7e5e4; border-radius: 3px; overflow: hidden; }
    .progress-fill { height: 100%; background: #4a7c59; transition: width 0.3s; width: 0; }
    .progress-label { display: flex; justify-content: space-between; font-size: 13px; color: #57534e; margin-top: 6px; }
    .banner-error {
      background: #fef2f2; border: 1px solid #fecaca; color: #dc2626;
      border-radius: 10px; padding: 14px; margin-bottom: 16px; font-size: 14px;
    }
    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
    .kv { font-size: 13px; margin-bottom: 6px; }
    .kv .k { color: #78716c; }
    .finding { font-size: 13px; margin-top: 6px; }
    .finding.issue { color: #dc2626; }
    .finding.warning { color: #ca8a04; }
    .finding.ok { color: #16a34a; }
    .badge {
      display: inline-block; padding: 2px 10px; border-radius: 999px;
      font-size: 12px; font-weight: 600;
    }
    .badge.green { background: #dcfce7; color: #166534; }
    .badge.yellow { background: #fef9c3; color: #854d0e; }
    .badge.red { background: #fee2e2; color: #991b1b; }
    .badge.gray { background: #f5f5f4; color: #57534e; }
    .stat { font-size: 24px; font-weight: 700; }
    .stat-label { font-size: 12px; color: #78716c; }
    .summary { font-size: 13px; color: #57534e; margin-top: 10px; }
    .preview img { max-width: 100%; max-height: 240px; border-radius: 8px; border: 1px solid #e7e5e4; margin-top: 10px; }
    ul.recs { margin: 8px 0 0 18px; font-size: 13px; color: #854d0e; }
    #results { display: none; }
  </style>
</head>
<body>
  <header>
    <h1>Veridoc</h1>
    <p>Upload a document to check metadata, text, images, and digital signatures for signs of forgery.</p>
  </header>

  <div class="card">
    <h2>Upload Document</h2>
    <div class="dropzone" id="dropzone">
      <div>Drag &amp; drop your document here, or click to browse</div>
      <div class="hint">PDF, Word (.doc/.docx), PNG, JPG, or plain text — max 50 MB, one file at a time</div>
    </div>
    <input type="file" id="file-input" accept=".pdf,.docx,.doc,.png,.jpg,.jpeg,.txt">
    <div class="file-row" id="file-row" style="display:none">
      <div>
        <div id="file-name" style="font-weight:500"></div>
        <div class="file-meta" id="file-meta"></div>
      </div>
      <button class="btn" id="btn-analyze">Analyze Document</button>
    </div>
    <div class="progress-wrap" id="progress-wrap" style="display:none">
      <div class="progress-bar"><div class="progress-fill" id="progress-fill"></div></div>
      <div class="progress-label">
        <span id="progress-step"></span>
        <span id="progress-pct"></span>
      </div>
    </div>
  </div>

  <div id="error-banner" class="banner-error" style="display:none"></div>

  <div id="results">
    <div class="grid">
      <div class="card" id="card-metadata"></div>
      <div class="card" id="card-text"></div>
    </div>
    <div class="card" id="card-image"></div>
    <div class="card" id="card-signature" style="display:none"></div>
  </div>

<script>
const dropzone = document.getElementById('dropzone');
const fileInput = document.getElementById('file-input');
let pollTimer = null;

function esc(value) {
  const div = document.createElement('div');
  div.textContent = value == null ? '' : String(value);
  return div.innerHTML;
}

function fmtDate(iso) {
  if (!iso) return 'Not available';
  const d = new Date(iso);
  return isNaN(d) ? 'Invalid date' : d.toLocaleString();
}

dropzone.addEventListener('click', () => fileInput.click());
dropzone.addEventListener('dragover', (e) => { e.preventDefault(); dropzone.classList.add('dragover'); });
dropzone.addEventListener('dragleave', () => dropzone.classList.remove('dragover'));
dropzone.addEventListener('drop', (e) => {
  e.preventDefault();
  dropzone.classList.remove('dragover');
  uploadFiles(e.dataTransfer.files);
});
fileInput.addEventListener('change', () => uploadFiles(fileInput.files));
document.getElementById('btn-analyze').addEventListener('click', startAnalysis);

async function uploadFiles(files) {
  if (!files.length) return;
  const form = new FormData();
  for (const file of files) form.append('file', file);
  form.append('last_modified', files[0].lastModified);
  const response = await fetch('/api/files', { method: 'POST', body: form });
  const body = await response.json();
  if (!response.ok) {
    showError(body.error ? body.error.message : 'Upload failed');
    return;
  }
  render(body);
}

async function startAnalysis() {
  const response = await fetch('/api/session/analyze', { method: 'POST' });
  const body = await response.json();
  if (!response.ok) {
    showError(body.error ? body.error.message : 'Could not start analysis');
    return;
  }
  render(body);
  startPolling();
}

function startPolling() {
  if (pollTimer) return;
  pollTimer = setInterval(async () => {
    const view = await (await fetch('/api/session')).json();
    render(view);
    if (view.phase !== 'analyzing' && !view.running) {
      clearInterval(pollTimer);
      pollTimer = null;
    }
  }, 500);
}

function showError(message) {
  const banner = document.getElementById('error-banner');
  banner.textContent = message;
  banner.style.display = 'block';
}

function render(view) {
  const banner = document.getElementById('error-banner');
  if (view.error) {
    banner.textContent = view.error.message;
    banner.style.display = 'block';
  } else {
    banner.style.display = 'none';
  }

  const fileRow = document.getElementById('file-row');
  if (view.file) {
    fileRow.style.display = 'flex';
    document.getElementById('file-name').textContent = view.file.name;
    document.getElementById('file-meta').textContent =
      (view.file.size / 1024 / 1024).toFixed(2) + ' MB · ' + view.file.type;
  } else {
    fileRow.style.display = 'none';
  }
  document.getElementById('btn-analyze').disabled = view.running || view.phase !== 'ready';

  const progress = document.getElementById('progress-wrap');
  if (view.running) {
    progress.style.display = 'block';
    document.getElementById('progress-fill').style.width = view.progress + '%';
    document.getElementById('progress-step').textContent = view.step;
    document.getElementById('progress-pct').textContent = view.progress + '%';
  } else {
    progress.style.display = 'none';
  }

  const results = document.getElementById('results');
  if (view.phase === 'results' && view.report) {
    results.style.display = 'block';
    renderReport(view.report, view.file);
  } else {
    results.style.display = 'none';
  }
}

function renderReport(report, file) {
  renderMetadata(report.metadata, file);
  renderText(report.text);
  renderImage(report.image);
  renderSignature(report.signature);
}

function findingRows(integrity) {
  if (!integrity) return '';
  const rows = [];
  for (const issue of integrity.issues) {
    rows.push('<div class="finding issue">&#9888; ' + esc(issue) + '</div>');
  }
  for (const warning of integrity.warnings) {
    rows.push('<div class="finding warning">&#9888; ' + esc(warning) + '</div>');
  }
  if (!rows.length) {
    rows.push('<div class="finding ok">&#10003; No suspicious metadata modifications detected</div>');
  }
  return rows.join('');
}

function renderMetadata(meta, file) {
  const card = document.getElementById('card-metadata');
  if (!meta) { card.innerHTML = '<h2>Document Metadata</h2><div class="summary">Not available</div>'; return; }
  const preview = file && file.preview
    ? '<div class="preview"><img src="' + file.preview + '" alt="' + esc(file.name) + '"></div>'
    : '';
  card.innerHTML = '<h2>Document Metadata</h2>'
    + '<div class="kv"><span class="k">Filename:</span> ' + esc(meta.filename) + '</div>'
    + '<div class="kv"><span class="k">File Size:</span> ' + esc(meta.sizeDisplay) + '</div>'
    + '<div class="kv"><span class="k">File Type:</span> ' + esc(meta.type) + '</div>'
    + (meta.pageCount ? '<div class="kv"><span class="k">Pages:</span> ' + esc(meta.pageCount) + '</div>' : '')
    + '<div class="kv"><span class="k">Author:</span> ' + esc(meta.author || 'Not specified') + '</div>'
    + '<div class="kv"><span class="k">Created:</span> ' + esc(meta.createdDate ? fmtDate(meta.createdDate) : 'Not available') + '</div>'
    + '<div class="kv"><span class="k">Last Modified:</span> ' + esc(fmtDate(meta.lastModified)) + '</div>'
    + '<h2 style="margin-top:14px">Metadata Integrity</h2>'
    + findingRows(meta.integrity)
    + preview;
}

function renderText(text) {
  const card = document.getElementById('card-text');
  if (!text) { card.innerHTML = '<h2>Text Analysis</h2><div class="summary">Not available</div>'; return; }
  const flags = text.flags.map((flag) => '<div class="finding warning">&#9888; ' + esc(flag) + '</div>').join('');
  const recs = text.recommendations.length
    ? '<ul class="recs">' + text.recommendations.map((rec) => '<li>' + esc(rec) + '</li>').join('') + '</ul>'
    : '';
  card.innerHTML = '<h2>Text Analysis</h2>'
    + '<div class="kv"><span class="k">Authenticity Confidence:</span> '
    + '<span class="badge ' + text.band + '">' + text.confidence + '%</span></div>'
    + '<div class="summary">' + esc(text.message) + '</div>'
    + '<div class="grid" style="margin-top:12px">'
    + '<div><div class="stat">' + text.totalWords.toLocaleString() + '</div><div class="stat-label">Total Words Analyzed</div></div>'
    + '<div><div class="stat">' + text.suspiciousWords + '</div><div class="stat-label">Suspicious Elements</div></div>'
    + '</div>'
    + '<div class="summary">' + esc(text.summary) + '</div>'
    + flags + recs;
}

function renderImage(image) {
  const card = document.getElementById('card-image');
  if (!image) { card.innerHTML = '<h2>Image Analysis</h2><div class="summary">Not available</div>'; return; }
  if (!image.hasImages) {
    card.innerHTML = '<h2>Image Analysis</h2><div class="summary">' + esc(image.summary) + '</div>';
    return;
  }
  const note = image.lowConfidenceNote
    ? '<div class="finding warning">&#9888; ' + esc(image.lowConfidenceNote) + '</div>'
    : '';
  const regions = image.suspiciousRegions
    .map((region) => '<div class="finding issue">&#9888; ' + esc(region) + '</div>')
    .join('');
  card.innerHTML = '<h2>Image Analysis</h2>'
    + '<div class="kv"><span class="k">Image Authenticity:</span> '
    + '<span class="badge ' + image.band + '">' + image.confidence + '%</span></div>'
    + '<div class="grid" style="margin-top:12px">'
    + '<div><div class="stat">' + image.imagesFound + '</div><div class="stat-label">Images Found</div></div>'
    + '<div><div class="stat">' + image.tamperedImages + '</div><div class="stat-label">Potentially Tampered</div></div>'
    + '</div>'
    + '<div class="summary">' + esc(image.summary) + '</div>'
    + note + regions;
}

function badgeClassFor(status) {
  if (status === 'valid') return 'green';
  if (status === 'invalid') return 'red';
  return 'gray';
}

function renderSignature(signature) {
  const card = document.getElementById('card-signature');
  if (!signature) { card.style.display = 'none'; return; }
  card.style.display = 'block';
  const trust = signature.trust
    ? '<div class="finding ' + (signature.trust.integrityVerified ? 'ok' : 'issue') + '">'
      + 'Document integrity: ' + (signature.trust.integrityVerified ? 'Verified' : 'Compromised') + '</div>'
      + '<div class="finding ' + (signature.trust.certificateValid ? 'ok' : 'warning') + '">'
      + 'Certificate validity: ' + esc(signature.certificate) + '</div>'
      + '<div class="finding ' + (signature.trust.signerIdentified ? 'ok' : 'issue') + '">'
      + 'Signer identity: ' + (signature.trust.signerIdentified ? 'Identified' : 'Unknown') + '</div>'
    : '';
  card.innerHTML = '<h2>Digital Signature Check</h2>'
    + '<div class="kv"><span class="badge ' + badgeClassFor(signature.status) + '">' + esc(signature.badge) + '</span></div>'
    + '<div class="kv" style="font-weight:500">' + esc(signature.title) + '</div>'
    + '<div class="summary">' + esc(signature.description) + '</div>'
    + '<div class="kv" style="margin-top:10px"><span class="k">Signer Name:</span> ' + esc(signature.signerName) + '</div>'
    + '<div class="kv"><span class="k">Signed Date:</span> ' + esc(signature.signedDate ? fmtDate(signature.signedDate) : 'Not available') + '</div>'
    + '<div class="kv"><span class="k">Certificate Status:</span> ' + esc(signature.certificate) + '</div>'
    + '<div class="summary">' + esc(signature.certificateMessage) + '</div>'
    + trust;
}

// Pick up state on load (e.g. after a page refresh mid-analysis)
fetch('/api/session').then((r) => r.json()).then((view) => {
  render(view);
  if (view.phase === 'analyzing' || view.running) startPolling();
});
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_self_contained() {
        assert!(DASHBOARD_HTML.contains("<!DOCTYPE html>"));
        assert!(!DASHBOARD_HTML.contains("http://"), "no external resources");
        assert!(!DASHBOARD_HTML.contains("https://"), "no external resources");
    }

    #[test]
    fn page_wires_the_api_endpoints() {
        assert!(DASHBOARD_HTML.contains("/api/files"));
        assert!(DASHBOARD_HTML.contains("/api/session"));
        assert!(DASHBOARD_HTML.contains("/api/session/analyze"));
    }
}
