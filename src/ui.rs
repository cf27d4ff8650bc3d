pub fn render_index(date: &str, weekday: &str) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{WEEKDAY}}", weekday)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Tracker</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
    }

    .tabs {
      display: flex;
      gap: 8px;
    }

    .tabs button.active {
      background: var(--accent);
      color: white;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
      background: #efe7da;
    }

    button:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border-top: 4px solid var(--accent);
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td, th {
      padding: 8px;
      text-align: left;
      border-bottom: 1px solid #eee3d3;
    }

    td input[type="text"] {
      width: 80px;
    }

    tr.modified td {
      background: #fff4e5;
    }

    .message {
      min-height: 1.2em;
      color: var(--accent-2);
    }

    .message.error {
      color: #c62828;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Fitness Tracker</h1>
      <p class="subtitle">{{WEEKDAY}}, {{DATE}}</p>
    </header>

    <section>
      <div class="tabs" id="period-tabs">
        <button data-period="daily" class="active">Daily</button>
        <button data-period="weekly">Weekly</button>
        <button data-period="overall">Overall</button>
      </div>
      <div class="panel" id="stats"></div>
    </section>

    <section>
      <h2 id="plan-title">Workout plan</h2>
      <p class="subtitle">
        <select id="plan-select"></select>
        <button id="plan-load">Load plan</button>
      </p>
      <table>
        <thead>
          <tr><th>Done</th><th>Exercise</th><th>Muscle</th><th>Weight</th><th>Reps</th><th>Sets</th></tr>
        </thead>
        <tbody id="exercises"></tbody>
      </table>
      <p><button id="save">Save completed exercises</button></p>
      <p class="message" id="message"></p>
    </section>
  </main>

  <script>
    const statsEl = document.getElementById("stats");
    const exercisesEl = document.getElementById("exercises");
    const messageEl = document.getElementById("message");
    const saveBtn = document.getElementById("save");
    let period = "daily";

    function say(text, isError) {
      messageEl.textContent = text;
      messageEl.className = isError ? "message error" : "message";
    }

    async function call(method, url, body) {
      const res = await fetch(url, {
        method,
        headers: body ? { "Content-Type": "application/json" } : {},
        body: body ? JSON.stringify(body) : undefined,
      });
      if (!res.ok) {
        throw new Error(await res.text());
      }
      return res.status === 204 ? null : res.json();
    }

    function esc(value) {
      return String(value)
        .replace(/&/g, "&amp;")
        .replace(/</g, "&lt;")
        .replace(/>/g, "&gt;")
        .replace(/"/g, "&quot;")
        .replace(/'/g, "&#39;");
    }

    function card(label, value) {
      return `<div class="stat"><span class="label">${label}</span><div class="value">${value}</div></div>`;
    }

    async function loadStats() {
      try {
        const s = await call("GET", `/api/stats?period=${period}`);
        let html = card("Total Workouts", s.workoutCount);
        if (s.daysActive !== undefined) {
          html += card("Days Active", s.daysActive);
        }
        html += card(period === "daily" ? "Today's Volume" : "Total Volume", `${s.totalVolume.toLocaleString()} lbs`);
        html += card("Total Calories", s.totalCalories.toLocaleString());
        html += card("Total Protein", `${s.totalProtein}g`);
        statsEl.innerHTML = html;
      } catch (err) {
        say(`Error: ${err.message}`, true);
      }
    }

    function renderSession(session) {
      document.getElementById("plan-title").textContent = session.planName || "Workout plan";
      saveBtn.disabled = session.saving || !session.planId;
      exercisesEl.innerHTML = session.exercises.map((e, i) => `
        <tr class="${e.modified ? "modified" : ""}">
          <td><input type="checkbox" data-toggle="${i}" ${e.completed ? "checked" : ""} /></td>
          <td>${esc(e.exerciseName)}</td>
          <td>${esc(e.muscle)}</td>
          <td><input type="text" data-index="${i}" data-field="weight" value="${esc(e.weight)}" /></td>
          <td><input type="text" data-index="${i}" data-field="reps" value="${esc(e.reps)}" /></td>
          <td><input type="text" data-index="${i}" data-field="sets" value="${esc(e.sets)}" /></td>
        </tr>`).join("");
    }

    async function loadPlans() {
      const plans = await call("GET", "/api/plans");
      document.getElementById("plan-select").innerHTML = plans
        .map((p) => `<option value="${esc(p.id)}">${esc(p.planName)}</option>`)
        .join("");
      renderSession(await call("GET", "/api/session"));
    }

    document.getElementById("period-tabs").addEventListener("click", (event) => {
      const next = event.target.dataset.period;
      if (!next) return;
      period = next;
      document.querySelectorAll("#period-tabs button").forEach((b) => {
        b.classList.toggle("active", b.dataset.period === period);
      });
      loadStats();
    });

    document.getElementById("plan-load").addEventListener("click", async () => {
      const planId = document.getElementById("plan-select").value;
      try {
        renderSession(await call("POST", "/api/session/load", { planId }));
        say("");
      } catch (err) {
        say(`Error: ${err.message}`, true);
      }
    });

    exercisesEl.addEventListener("change", async (event) => {
      const t = event.target;
      try {
        if (t.dataset.toggle !== undefined) {
          renderSession(await call("POST", "/api/session/toggle", { index: Number(t.dataset.toggle) }));
        } else if (t.dataset.field) {
          renderSession(await call("POST", "/api/session/edit", {
            index: Number(t.dataset.index),
            field: t.dataset.field,
            value: t.value,
          }));
        }
      } catch (err) {
        say(`Error: ${err.message}`, true);
      }
    });

    saveBtn.addEventListener("click", async () => {
      saveBtn.disabled = true;
      try {
        const res = await call("POST", "/api/session/save");
        renderSession(res.session);
        const note = res.report.refreshed ? "" : " (lists could not be refreshed, reload to see them)";
        say(`Saved ${res.report.logged.length} exercises${note}`);
        loadStats();
      } catch (err) {
        say(`Error: ${err.message}`, true);
        saveBtn.disabled = false;
      }
    });

    loadStats();
    loadPlans().catch((err) => say(`Error: ${err.message}`, true));
  </script>
</body>
</html>
"##;
