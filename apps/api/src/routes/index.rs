use axum::response::Html;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>SkillMatch Career Predictor</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 760px; margin: 0 auto; padding: 24px; }
    textarea { width: 100%; height: 160px; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 16px; }
    #result { margin-top: 20px; padding: 12px; background: #eef4fb; display: none; }
  </style>
</head>
<body>
  <h1>SkillMatch Career Predictor</h1>
  <p>Paste your skills or resume text to get a predicted career.</p>
  <form id="predict-form">
    <label for="resume-text">Skills / resume text</label>
    <textarea id="resume-text" placeholder="Python, SQL, Machine Learning..."></textarea>
    <button type="submit">Predict career</button>
  </form>
  <div id="result"></div>
  <script>
    const form = document.getElementById("predict-form");
    const result = document.getElementById("result");
    form.addEventListener("submit", async (event) => {
      event.preventDefault();
      const text = document.getElementById("resume-text").value;
      if (!text.trim()) {
        alert("Enter some text about your skills or experience.");
        return;
      }
      result.style.display = "block";
      result.textContent = "Analyzing...";
      try {
        const response = await fetch("/predict", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ text }),
        });
        const body = await response.json();
        result.textContent = response.ok
          ? `Predicted career: ${body.predicted_career}`
          : `Error: ${body.error ? body.error.message : "request failed"}`;
      } catch (err) {
        result.textContent = `Error: ${err.message}`;
      }
    });
  </script>
</body>
</html>
"#;

/// GET /
/// Browser form that posts raw text to `/predict`.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
