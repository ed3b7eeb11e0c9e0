use crate::controller::{Border, SubmitKind};
use crate::models::StateSnapshot;

pub fn render_index(snapshot: &StateSnapshot) -> String {
    let mut page = INDEX_HTML
        .replace("{{BALANCE}}", &snapshot.balance.to_string())
        .replace("{{NEED}}", &snapshot.need.to_string())
        .replace("{{TARGET}}", &snapshot.target.to_string())
        .replace("{{TODAY}}", &escape_html(&snapshot.today.to_string()))
        .replace("{{BORDER}}", Border::for_balance(snapshot.balance).css())
        .replace("{{POSITIVE_BORDER}}", Border::Positive.css())
        .replace("{{NEGATIVE_BORDER}}", Border::Negative.css());
    for kind in SubmitKind::ALL {
        let key = format!("{{{{HINT_{}}}}}", kind.input_id());
        page = page.replace(&key, kind.hint());
    }
    page
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Focus Balance</title>
  <style>
    :root {
      --bg: #10131a;
      --card: #1a1f2b;
      --ink: #e8ecf4;
      --muted: #8a93a6;
      --good: #37d67a;
      --bad: #ff5c5c;
      --accent: #5b8cff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #1c2436, var(--bg) 70%);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 22px;
      border: 1px solid rgba(255, 255, 255, 0.06);
    }

    #balanceText {
      font-size: 2.6rem;
      font-weight: 700;
    }

    #needText,
    .label {
      color: var(--muted);
    }

    .meta {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 16px;
    }

    .meta .value {
      font-size: 1.4rem;
      font-weight: 600;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .action {
      display: grid;
      gap: 10px;
    }

    input {
      width: 100%;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(255, 255, 255, 0.12);
      background: #0f131c;
      color: var(--ink);
      font-size: 1rem;
    }

    button {
      padding: 10px 12px;
      border: none;
      border-radius: 10px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    #relaxBtn {
      background: #8a5bff;
    }

    #targetBtn {
      background: #3b4457;
    }

    .status {
      min-height: 1.2em;
      color: var(--bad);
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Focus Balance</h1>

    <section id="balanceCard" class="card" style="border: {{BORDER}}">
      <div class="label">Balance</div>
      <div id="balanceText">{{BALANCE}} min</div>
      <div id="needText">To break even: {{NEED}} min</div>
    </section>

    <section class="meta">
      <div class="card">
        <div class="label">Daily target</div>
        <div id="targetText" class="value">{{TARGET}}</div>
      </div>
      <div class="card">
        <div class="label">Today</div>
        <div id="todayText" class="value">{{TODAY}}</div>
      </div>
    </section>

    <section class="actions">
      <div class="card action">
        <label class="label" for="workInput">Worked (minutes)</label>
        <input id="workInput" type="number" min="1" placeholder="45" />
        <button id="workBtn" type="button">Add work</button>
      </div>
      <div class="card action">
        <label class="label" for="relaxInput">Relaxed (minutes)</label>
        <input id="relaxInput" type="number" min="1" placeholder="30" />
        <button id="relaxBtn" type="button">Spend relax</button>
      </div>
      <div class="card action">
        <label class="label" for="targetInput">Daily target (minutes)</label>
        <input id="targetInput" type="number" min="1" placeholder="120" />
        <button id="targetBtn" type="button">Set target</button>
      </div>
    </section>

    <div id="status" class="status" role="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const readJSON = async (res) => {
      if (!res.ok) {
        let message = res.statusText;
        try {
          message = (await res.json()).error || message;
        } catch (_) {}
        throw new Error(message || 'Request failed');
      }
      return res.json();
    };

    const getJSON = async (url) => {
      const res = await fetch(url, { headers: { 'Content-Type': 'application/json' } });
      return readJSON(res);
    };

    const postJSON = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body)
      });
      return readJSON(res);
    };

    const render = (data) => {
      document.getElementById('balanceText').textContent = `${data.balance} min`;
      document.getElementById('needText').textContent = `To break even: ${data.need} min`;
      document.getElementById('targetText').textContent = data.target;
      document.getElementById('todayText').textContent = data.today;
      document.getElementById('balanceCard').style.border =
        data.balance >= 0 ? '{{POSITIVE_BORDER}}' : '{{NEGATIVE_BORDER}}';
    };

    const refresh = async () => {
      render(await getJSON('/api/state'));
      setStatus('');
    };

    const bind = (buttonId, inputId, url, field, hint) => {
      document.getElementById(buttonId).addEventListener('click', async () => {
        const input = document.getElementById(inputId);
        const value = parseInt(input.value, 10);
        if (isNaN(value) || value <= 0) {
          alert(hint);
          return;
        }
        try {
          await postJSON(url, { [field]: value });
          input.value = '';
          await refresh();
        } catch (err) {
          setStatus(err.message);
        }
      });
    };

    window.addEventListener('DOMContentLoaded', () => {
      refresh().catch((err) => setStatus(err.message));
      bind('workBtn', 'workInput', '/api/work', 'minutes', '{{HINT_workInput}}');
      bind('relaxBtn', 'relaxInput', '/api/relax', 'minutes', '{{HINT_relaxInput}}');
      bind('targetBtn', 'targetInput', '/api/target', 'target', '{{HINT_targetInput}}');
    });
  </script>
</body>
</html>
"#;
